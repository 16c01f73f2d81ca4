use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;
use crate::domain::clock::Clock;
use crate::domain::reset::errors::ResetError;
use crate::domain::reset::models::ResetToken;
use crate::domain::reset::models::ResetTokenId;
use crate::domain::reset::ports::ResetMailer;
use crate::domain::reset::ports::ResetServicePort;
use crate::domain::reset::ports::ResetTokenRepository;

/// Password-reset workflow implementation.
///
/// The per-account state machine (no request pending / request pending /
/// consumed / expired) is implicit: it is derived from the presence and
/// expiry of token rows, never stored.
///
/// Two independent durations govern the workflow and must not be conflated:
/// the token's own lifetime (`reset_ttl`, default 24h) and the minimum wait
/// between successive requests (`cooldown`, default 10min). A token issued
/// 11 minutes ago no longer blocks a new request even though it stays
/// valid for almost a day; the older token is then superseded and stops
/// resolving.
pub struct ResetService<RR, AR, M, C>
where
    RR: ResetTokenRepository,
    AR: AccountRepository,
    M: ResetMailer,
    C: Clock,
{
    tokens: Arc<RR>,
    accounts: Arc<AR>,
    mailer: Arc<M>,
    clock: Arc<C>,
    password_hasher: auth::PasswordHasher,
    reset_ttl: Duration,
    cooldown: Duration,
}

impl<RR, AR, M, C> ResetService<RR, AR, M, C>
where
    RR: ResetTokenRepository,
    AR: AccountRepository,
    M: ResetMailer,
    C: Clock,
{
    /// Create a new reset service with injected dependencies.
    ///
    /// # Arguments
    /// * `tokens` - Reset-token persistence
    /// * `accounts` - Account persistence
    /// * `mailer` - Outbound reset-link mail
    /// * `clock` - Wall-clock source
    /// * `reset_ttl_minutes` - Token lifetime
    /// * `cooldown_minutes` - Minimum wait between requests per account
    pub fn new(
        tokens: Arc<RR>,
        accounts: Arc<AR>,
        mailer: Arc<M>,
        clock: Arc<C>,
        reset_ttl_minutes: i64,
        cooldown_minutes: i64,
    ) -> Self {
        Self {
            tokens,
            accounts,
            mailer,
            clock,
            password_hasher: auth::PasswordHasher::new(),
            reset_ttl: Duration::minutes(reset_ttl_minutes),
            cooldown: Duration::minutes(cooldown_minutes),
        }
    }

    /// Issue time of a token, reconstructed from its expiry.
    ///
    /// Rows do not store a creation timestamp; `expires_at` was stamped as
    /// `issued_at + reset_ttl`, so the subtraction recovers it.
    fn issued_at(&self, token: &ResetToken) -> chrono::DateTime<chrono::Utc> {
        token.expires_at - self.reset_ttl
    }
}

#[async_trait]
impl<RR, AR, M, C> ResetServicePort for ResetService<RR, AR, M, C>
where
    RR: ResetTokenRepository,
    AR: AccountRepository,
    M: ResetMailer,
    C: Clock,
{
    async fn request(&self, email: &str) -> Result<ResetToken, ResetError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?
            .ok_or(ResetError::NotFound)?;

        let now = self.clock.now();

        if let Some(current) = self.tokens.most_recent_for_account(&account.id).await? {
            if now < self.issued_at(&current) + self.cooldown {
                return Err(ResetError::Cooldown);
            }
        }

        let token = ResetToken {
            id: ResetTokenId::new(),
            account_id: account.id,
            expires_at: now + self.reset_ttl,
        };

        // Tokens expiring after this instant were issued within the
        // cooldown window; the repository re-checks under a per-account
        // lock so two concurrent requests cannot both pass.
        let cooldown_cutoff = now + self.reset_ttl - self.cooldown;
        let token = self.tokens.create(token, cooldown_cutoff).await?;

        self.mailer
            .send_reset_link(account.email.as_str(), &token.id)
            .await?;

        Ok(token)
    }

    async fn resolve(&self, token_id: &ResetTokenId) -> Result<Account, ResetError> {
        let token = self
            .tokens
            .find_by_id(token_id)
            .await?
            .ok_or(ResetError::NotFound)?;

        if token.is_expired(self.clock.now()) {
            return Err(ResetError::NotFound);
        }

        // Only the account's most recent live token may be walked to from
        // an email; an older, superseded link is dead even before expiry.
        let latest = self
            .tokens
            .most_recent_for_account(&token.account_id)
            .await?
            .ok_or(ResetError::NotFound)?;
        if latest.id != token.id {
            return Err(ResetError::NotFound);
        }

        self.accounts
            .find_by_id(&token.account_id)
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?
            .ok_or(ResetError::NotFound)
    }

    async fn consume(
        &self,
        token_id: &ResetTokenId,
        new_password: &str,
    ) -> Result<(), ResetError> {
        let token = self
            .tokens
            .find_by_id(token_id)
            .await?
            .ok_or(ResetError::NotFound)?;

        if token.is_expired(self.clock.now()) {
            return Err(ResetError::NotFound);
        }

        let account = self
            .accounts
            .find_by_id(&token.account_id)
            .await
            .map_err(|e| ResetError::DatabaseError(e.to_string()))?
            .ok_or(ResetError::NotFound)?;

        if new_password == account.email.as_str() {
            return Err(ResetError::PolicyViolation);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(|e| ResetError::Unknown(format!("Password hashing failed: {}", e)))?;

        // One atomic unit: the password change and the bulk invalidation of
        // every outstanding token for the account.
        self.tokens
            .consume_for_account(&account.id, &password_hash)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::errors::AccountError;
    use crate::domain::account::models::AccountId;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::NewAccount;
    use crate::domain::account::models::Username;
    use crate::domain::reset::errors::MailerError;

    const RESET_TTL_MINUTES: i64 = 1440;
    const COOLDOWN_MINUTES: i64 = 10;

    mock! {
        pub TestResetTokenRepository {}

        #[async_trait]
        impl ResetTokenRepository for TestResetTokenRepository {
            async fn create(&self, token: ResetToken, cooldown_cutoff: DateTime<Utc>) -> Result<ResetToken, ResetError>;
            async fn find_by_id(&self, id: &ResetTokenId) -> Result<Option<ResetToken>, ResetError>;
            async fn most_recent_for_account(&self, account_id: &AccountId) -> Result<Option<ResetToken>, ResetError>;
            async fn consume_for_account(&self, account_id: &AccountId, password_hash: &str) -> Result<(), ResetError>;
        }
    }

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestResetMailer {}

        #[async_trait]
        impl ResetMailer for TestResetMailer {
            async fn send_reset_link(&self, recipient: &str, token_id: &ResetTokenId) -> Result<(), MailerError>;
        }
    }

    /// Pinned clock, advanceable within a test.
    struct TestClock(Mutex<DateTime<Utc>>);

    impl TestClock {
        fn at(t: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(t)))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn account() -> Account {
        Account {
            id: AccountId(1),
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            username: Username::new("rider".to_string()).unwrap(),
            name: "Rider".to_string(),
            password_hash: "$2b$12$test_hash".to_string(),
            photo: None,
            created_at: t0() - Duration::days(30),
        }
    }

    fn token_issued_at(issued: DateTime<Utc>) -> ResetToken {
        ResetToken {
            id: ResetTokenId::new(),
            account_id: AccountId(1),
            expires_at: issued + Duration::minutes(RESET_TTL_MINUTES),
        }
    }

    fn service(
        tokens: MockTestResetTokenRepository,
        accounts: MockTestAccountRepository,
        mailer: MockTestResetMailer,
        clock: Arc<TestClock>,
    ) -> ResetService<MockTestResetTokenRepository, MockTestAccountRepository, MockTestResetMailer, TestClock>
    {
        ResetService::new(
            Arc::new(tokens),
            Arc::new(accounts),
            Arc::new(mailer),
            clock,
            RESET_TTL_MINUTES,
            COOLDOWN_MINUTES,
        )
    }

    #[tokio::test]
    async fn test_request_issues_token_and_mails_link() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mut mailer = MockTestResetMailer::new();

        accounts
            .expect_find_by_email()
            .with(eq("a@b.com"))
            .times(1)
            .returning(|_| Ok(Some(account())));

        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(|_| Ok(None));

        let expected_expiry = t0() + Duration::minutes(RESET_TTL_MINUTES);
        let expected_cutoff = expected_expiry - Duration::minutes(COOLDOWN_MINUTES);
        tokens
            .expect_create()
            .withf(move |token, cutoff| {
                token.account_id == AccountId(1)
                    && token.expires_at == expected_expiry
                    && *cutoff == expected_cutoff
            })
            .times(1)
            .returning(|token, _| Ok(token));

        mailer
            .expect_send_reset_link()
            .withf(|recipient, _| recipient == "a@b.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let token = service.request("a@b.com").await.unwrap();
        assert_eq!(token.account_id, AccountId(1));
        assert_eq!(token.expires_at, expected_expiry);
    }

    #[tokio::test]
    async fn test_request_unknown_email_is_not_found() {
        let tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.request("nobody@b.com").await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }

    #[tokio::test]
    async fn test_request_five_minutes_after_previous_hits_cooldown() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(account())));

        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(|_| Ok(Some(token_issued_at(t0()))));
        tokens.expect_create().times(0);

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(5));
        let service = service(tokens, accounts, mailer, clock);

        let result = service.request("a@b.com").await;
        assert!(matches!(result, Err(ResetError::Cooldown)));
    }

    #[tokio::test]
    async fn test_request_eleven_minutes_after_previous_succeeds() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mut mailer = MockTestResetMailer::new();

        let first = token_issued_at(t0());
        let first_id = first.id;

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(account())));

        // The earlier token is still live for almost a day, but it was
        // issued outside the cooldown window and no longer blocks.
        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(move |_| Ok(Some(first.clone())));
        tokens
            .expect_create()
            .times(1)
            .returning(|token, _| Ok(token));

        mailer
            .expect_send_reset_link()
            .times(1)
            .returning(|_, _| Ok(()));

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(11));
        let service = service(tokens, accounts, mailer, clock);

        let second = service.request("a@b.com").await.unwrap();
        assert_ne!(second.id, first_id);
    }

    #[tokio::test]
    async fn test_request_lost_race_surfaces_cooldown() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(account())));

        // Check passed, but a concurrent request inserted first.
        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(|_| Ok(None));
        tokens
            .expect_create()
            .times(1)
            .returning(|_, _| Err(ResetError::Cooldown));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.request("a@b.com").await;
        assert!(matches!(result, Err(ResetError::Cooldown)));
    }

    #[tokio::test]
    async fn test_request_mailer_failure_propagates() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mut mailer = MockTestResetMailer::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(account())));
        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(|_| Ok(None));
        tokens
            .expect_create()
            .times(1)
            .returning(|token, _| Ok(token));
        mailer
            .expect_send_reset_link()
            .times(1)
            .returning(|_, _| Err(MailerError::SendFailed("relay refused".to_string())));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.request("a@b.com").await;
        assert!(matches!(result, Err(ResetError::Mailer(_))));
    }

    #[tokio::test]
    async fn test_resolve_most_recent_live_token() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        let token = token_issued_at(t0());
        let token_id = token.id;
        let latest = token.clone();

        tokens
            .expect_find_by_id()
            .withf(move |id| *id == token_id)
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(move |_| Ok(Some(latest.clone())));
        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(account())));

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(30));
        let service = service(tokens, accounts, mailer, clock);

        let resolved = service.resolve(&token_id).await.unwrap();
        assert_eq!(resolved.id, AccountId(1));
    }

    #[tokio::test]
    async fn test_resolve_superseded_token_is_not_found() {
        let mut tokens = MockTestResetTokenRepository::new();
        let accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        // An eleven-minutes-newer token supersedes the first; the first is
        // unexpired but must no longer resolve.
        let first = token_issued_at(t0());
        let second = token_issued_at(t0() + Duration::minutes(11));
        let first_id = first.id;

        tokens
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(first.clone())));
        tokens
            .expect_most_recent_for_account()
            .times(1)
            .returning(move |_| Ok(Some(second.clone())));

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(12));
        let service = service(tokens, accounts, mailer, clock);

        let result = service.resolve(&first_id).await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }

    #[tokio::test]
    async fn test_resolve_expired_token_is_not_found() {
        let mut tokens = MockTestResetTokenRepository::new();
        let accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        let token = token_issued_at(t0());
        let id = token.id;

        tokens
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        tokens.expect_most_recent_for_account().times(0);

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(RESET_TTL_MINUTES + 1));
        let service = service(tokens, accounts, mailer, clock);

        let result = service.resolve(&id).await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }

    #[tokio::test]
    async fn test_resolve_unknown_token_is_not_found() {
        let mut tokens = MockTestResetTokenRepository::new();
        let accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        tokens.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.resolve(&ResetTokenId::new()).await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }

    #[tokio::test]
    async fn test_consume_hashes_and_invalidates_all_tokens() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        let token = token_issued_at(t0());
        let id = token.id;

        tokens
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(account())));
        tokens
            .expect_consume_for_account()
            .withf(|account_id, hash| {
                *account_id == AccountId(1) && hash.starts_with("$2") && hash != "Abcd1234"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(30));
        let service = service(tokens, accounts, mailer, clock);

        assert!(service.consume(&id, "Abcd1234").await.is_ok());
    }

    #[tokio::test]
    async fn test_consume_rejects_password_equal_to_email() {
        let mut tokens = MockTestResetTokenRepository::new();
        let mut accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        let token = token_issued_at(t0());
        let id = token.id;

        tokens
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(account())));
        // Nothing may be mutated on a policy violation.
        tokens.expect_consume_for_account().times(0);

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.consume(&id, "a@b.com").await;
        assert!(matches!(result, Err(ResetError::PolicyViolation)));
    }

    #[tokio::test]
    async fn test_consume_expired_token_is_not_found() {
        let mut tokens = MockTestResetTokenRepository::new();
        let accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        let token = token_issued_at(t0());
        let id = token.id;

        tokens
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));

        let clock = TestClock::at(t0());
        clock.advance(Duration::minutes(RESET_TTL_MINUTES + 1));
        let service = service(tokens, accounts, mailer, clock);

        let result = service.consume(&id, "Abcd1234").await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }

    #[tokio::test]
    async fn test_consume_twice_is_not_found_after_bulk_deletion() {
        let mut tokens = MockTestResetTokenRepository::new();
        let accounts = MockTestAccountRepository::new();
        let mailer = MockTestResetMailer::new();

        // After a successful consume every token of the account is gone, so
        // a replayed link no longer exists.
        tokens.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(tokens, accounts, mailer, TestClock::at(t0()));

        let result = service.consume(&ResetTokenId::new(), "Abcd1234").await;
        assert!(matches!(result, Err(ResetError::NotFound)));
    }
}
