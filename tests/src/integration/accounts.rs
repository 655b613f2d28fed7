//! Account flows exercised through the public `AccountApi` trait, the way an
//! embedding request layer would drive them.

#[cfg(test)]
mod tests {
    use netreg_accounts::{
        AccountApi, AccountError, AccountService, AccountsConfig, InMemoryAccountStore,
        MailMessage, RecordingMailSink, TimeSource,
    };
    use std::sync::Arc;

    struct FixedTime(u64);

    impl TimeSource for FixedTime {
        fn now(&self) -> u64 {
            self.0
        }
    }

    fn config() -> AccountsConfig {
        AccountsConfig {
            salt: "integration-salt".to_string(),
            secret: "integration-secret".to_string(),
            ..AccountsConfig::default()
        }
    }

    fn boxed_service() -> (Box<dyn AccountApi>, Arc<RecordingMailSink>) {
        let sink = Arc::new(RecordingMailSink::new());
        let service = AccountService::new(
            InMemoryAccountStore::new(),
            Arc::clone(&sink),
            FixedTime(50_000),
            config(),
        );
        (Box::new(service), sink)
    }

    fn signed_token_from(message: &MailMessage) -> String {
        message
            .body
            .split("/verify/")
            .nth(1)
            .expect("body carries a verify link")
            .split_whitespace()
            .next()
            .expect("token ends the line")
            .to_string()
    }

    #[test]
    fn test_full_registration_round_trip_through_the_api() {
        let (api, sink) = boxed_service();

        let view = api.register("member@mesh.example", "hunter22").unwrap();
        assert!(!view.verified);

        let token = signed_token_from(&sink.sent()[0]);
        let view = api.verify("member@mesh.example", &token).unwrap();
        assert!(view.verified);

        let account = api.authenticate("member@mesh.example", "hunter22").unwrap();
        assert!(account.verified);
    }

    #[test]
    fn test_resend_uses_the_registration_namespace_until_verified() {
        let (api, sink) = boxed_service();
        api.register("member@mesh.example", "hunter22").unwrap();

        // An unverified member asking for a reset gets the registration
        // confirmation again, and the re-sent token still verifies.
        api.request_password_reset("member@mesh.example").unwrap();
        let resent = signed_token_from(&sink.sent()[1]);
        assert!(api.verify("member@mesh.example", &resent).unwrap().verified);
    }

    #[test]
    fn test_verification_token_is_account_bound() {
        let (api, sink) = boxed_service();
        api.register("alice@mesh.example", "hunter22").unwrap();
        api.register("bob@mesh.example", "hunter22").unwrap();

        let alice_token = signed_token_from(&sink.sent()[0]);
        let err = api.verify("bob@mesh.example", &alice_token).unwrap_err();
        assert!(matches!(err, AccountError::TokenMismatch));
    }
}
