//! The full member journey across both subsystems: register, confirm,
//! reserve, inspect, release. The subsystems share nothing but the
//! `OwnerId`, exactly the contract the allocator's caller-identity concept
//! promises.

#[cfg(test)]
mod tests {
    use netreg_accounts::{
        AccountApi, AccountService, AccountsConfig, InMemoryAccountStore, RecordingMailSink,
        SystemTimeSource,
    };
    use netreg_allocator::{
        AllocatorConfig, InMemoryReservationStore, ReservationApi, ReservationService,
    };
    use shared_types::OwnerId;
    use std::sync::Arc;

    type Accounts = AccountService<InMemoryAccountStore, Arc<RecordingMailSink>, SystemTimeSource>;

    fn accounts() -> (Accounts, Arc<RecordingMailSink>) {
        let sink = Arc::new(RecordingMailSink::new());
        let config = AccountsConfig {
            salt: "flow-salt".to_string(),
            secret: "flow-secret".to_string(),
            ..AccountsConfig::default()
        };
        let service = AccountService::new(
            InMemoryAccountStore::new(),
            Arc::clone(&sink),
            SystemTimeSource,
            config,
        );
        (service, sink)
    }

    fn allocator() -> ReservationService<InMemoryReservationStore> {
        ReservationService::new(InMemoryReservationStore::new(), AllocatorConfig::default())
            .unwrap()
    }

    fn signed_token_from(body: &str) -> &str {
        body.split("/verify/")
            .nth(1)
            .expect("body carries a verify link")
            .split_whitespace()
            .next()
            .expect("token ends the line")
    }

    fn owner_of(accounts: &Accounts, email: &str) -> OwnerId {
        accounts
            .authenticate(email, "hunter22")
            .expect("credentials are valid")
            .id
    }

    #[test]
    fn test_member_journey_register_confirm_reserve_release() {
        let (accounts, sink) = accounts();
        let allocator = allocator();

        // Register and confirm
        accounts.register("member@mesh.example", "hunter22").unwrap();
        let token = signed_token_from(&sink.sent()[0].body).to_string();
        accounts.verify("member@mesh.example", &token).unwrap();
        let member = owner_of(&accounts, "member@mesh.example");

        // Reserve a named block and an auto-assigned host address
        let block = allocator
            .create(member, Some("10.20.0.0"), Some(24))
            .unwrap();
        let host = allocator.create(member, None, None).unwrap();
        assert_eq!(block.network, "10.20.0.0/24");
        assert_eq!(host.network, "10.0.0.0/32");

        // The member's detail page: account view plus an explicit
        // reservation query, composed by the embedding layer
        let profile = serde_json::json!({
            "user": accounts.get(member).unwrap(),
            "networks": allocator.list_owned(member).unwrap(),
        });
        assert_eq!(profile["user"]["verified"], serde_json::json!(true));
        assert_eq!(
            profile["networks"][0]["url"],
            serde_json::json!("/networks/10.0.0.0/32")
        );
        assert_eq!(
            profile["networks"][1]["network"],
            serde_json::json!("10.20.0.0/24")
        );

        // Release everything, then the account
        allocator.delete(member, "10.20.0.0", 24).unwrap();
        allocator.delete(member, "10.0.0.0", 32).unwrap();
        accounts.delete(member).unwrap();

        assert!(allocator.list().unwrap().is_empty());
    }

    #[test]
    fn test_two_members_cannot_cross_mutate() {
        let (accounts, sink) = accounts();
        let allocator = allocator();

        accounts.register("alice@mesh.example", "hunter22").unwrap();
        let alice_token = signed_token_from(&sink.sent()[0].body).to_string();
        accounts.verify("alice@mesh.example", &alice_token).unwrap();
        accounts.register("bob@mesh.example", "hunter22").unwrap();
        let bob_token = signed_token_from(&sink.sent()[1].body).to_string();
        accounts.verify("bob@mesh.example", &bob_token).unwrap();

        let alice = owner_of(&accounts, "alice@mesh.example");
        let bob = owner_of(&accounts, "bob@mesh.example");

        allocator.create(alice, Some("192.168.10.0"), Some(24)).unwrap();

        // Bob can see the block but neither move nor release it
        assert_eq!(allocator.list().unwrap().len(), 1);
        assert!(allocator.delete(bob, "192.168.10.0", 24).is_err());
        assert!(allocator
            .update(bob, "192.168.10.0", 24, Some("192.168.20.0"), None)
            .is_err());

        // Bob's own reservation next to it is fine
        let bobs = allocator.create(bob, Some("192.168.11.0"), Some(24)).unwrap();
        assert_eq!(bobs.network, "192.168.11.0/24");
    }
}
