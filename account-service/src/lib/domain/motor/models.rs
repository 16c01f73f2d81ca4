use std::fmt;

use crate::domain::account::models::AccountId;

/// A motorcycle recorded by an account, with the price estimate it was
/// saved with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motor {
    pub id: MotorId,
    pub account_id: AccountId,
    pub image_id: Option<MotorImageId>,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub province: String,
    pub engine_size: i32,
    pub predicted_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotorId(pub i64);

impl fmt::Display for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An uploaded motorcycle photo and the model the classifier saw in it.
///
/// `filename` is the stored-object name; the row is the ownership record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotorImage {
    pub id: MotorImageId,
    pub account_id: AccountId,
    pub filename: String,
    pub predicted_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotorImageId(pub i64);

impl fmt::Display for MotorImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to record a motor for an account.
#[derive(Debug, Clone)]
pub struct AddMotorCommand {
    pub image_id: Option<MotorImageId>,
    pub model: String,
    pub year: i32,
    pub mileage: i32,
    pub province: String,
    pub engine_size: i32,
    pub predicted_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}
