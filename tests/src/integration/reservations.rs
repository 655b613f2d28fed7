//! Allocator behavior end-to-end: the same lifecycle sequences against the
//! in-memory store and the file-backed store, plus persistence across
//! process "restarts" (store reopen).

#[cfg(test)]
mod tests {
    use netreg_allocator::{
        AllocationError, AllocatorConfig, FileBackedReservationStore, InMemoryReservationStore,
        ReservationApi, ReservationService,
    };
    use shared_types::OwnerId;

    fn memory_service() -> ReservationService<InMemoryReservationStore> {
        ReservationService::new(InMemoryReservationStore::new(), AllocatorConfig::default())
            .unwrap()
    }

    #[test]
    fn test_api_is_object_safe() {
        let service = memory_service();
        let api: &dyn ReservationApi = &service;
        let view = api.create(OwnerId::generate(), None, None).unwrap();
        assert_eq!(view.network, "10.0.0.0/32");
    }

    #[test]
    fn test_conflicting_request_reports_existing_block() {
        let service = memory_service();
        let owner = OwnerId::generate();
        service.create(owner, Some("192.168.0.0"), Some(26)).unwrap();

        let err = service
            .create(owner, Some("192.168.0.0"), Some(29))
            .unwrap_err();
        assert_eq!(err.to_string(), "ip address conflict: 192.168.0.0/26");
    }

    #[test]
    fn test_allocation_sequence_crosses_ranges() {
        let service = memory_service();
        let owner = OwnerId::generate();

        // Take the whole 10/8 range, then 172.16/12, then watch the search
        // land in 192.168/16
        service.create(owner, Some("10.0.0.0"), Some(8)).unwrap();
        service.create(owner, Some("172.16.0.0"), Some(12)).unwrap();

        let view = service.create(owner, None, Some(30)).unwrap();
        assert_eq!(view.network, "192.168.0.0/30");
    }

    #[test]
    fn test_default_allocations_are_strictly_increasing() {
        let service = memory_service();
        let owner = OwnerId::generate();
        let mut previous = None;
        for _ in 0..5 {
            let view = service.create(owner, None, None).unwrap();
            let base: std::net::Ipv4Addr = view.address.parse().unwrap();
            if let Some(previous) = previous {
                assert!(base > previous, "{base} should be above {previous}");
            }
            previous = Some(base);
        }
        assert_eq!(service.list().unwrap().len(), 5);
    }

    #[test]
    fn test_file_store_remembers_reservations_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.bin");
        let owner = OwnerId::generate();

        {
            let store = FileBackedReservationStore::open(&path).unwrap();
            let service =
                ReservationService::new(store, AllocatorConfig::default()).unwrap();
            service.create(owner, Some("10.1.0.0"), Some(16)).unwrap();
            service.create(owner, None, Some(24)).unwrap();
        }

        let store = FileBackedReservationStore::open(&path).unwrap();
        let service = ReservationService::new(store, AllocatorConfig::default()).unwrap();

        let networks: Vec<String> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|view| view.network)
            .collect();
        assert_eq!(networks, ["10.0.0.0/24", "10.1.0.0/16"]);

        // The reloaded state still drives conflict detection
        let err = service
            .create(owner, Some("10.1.128.0"), Some(24))
            .unwrap_err();
        assert!(matches!(err, AllocationError::Conflict { .. }));

        // And first-fit continues where the snapshot left off
        let view = service.create(owner, None, Some(24)).unwrap();
        assert_eq!(view.network, "10.0.1.0/24");
    }

    #[test]
    fn test_rejected_requests_leave_file_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.bin");
        let alice = OwnerId::generate();
        let bob = OwnerId::generate();

        {
            let store = FileBackedReservationStore::open(&path).unwrap();
            let service =
                ReservationService::new(store, AllocatorConfig::default()).unwrap();
            service.create(alice, Some("192.168.0.0"), Some(26)).unwrap();

            assert!(service.delete(bob, "192.168.0.0", 26).is_err());
            assert!(service
                .update(bob, "192.168.0.0", 26, Some("192.168.4.0"), None)
                .is_err());
        }

        let store = FileBackedReservationStore::open(&path).unwrap();
        let service = ReservationService::new(store, AllocatorConfig::default()).unwrap();
        let view = service.get("192.168.0.0", Some(26)).unwrap();
        assert_eq!(view.owner, alice.to_string());
    }

    #[test]
    fn test_custom_policy_order_drives_search_order() {
        let config = AllocatorConfig {
            policy_cidrs: vec!["192.168.0.0/16".to_string(), "10.0.0.0/8".to_string()],
            ..AllocatorConfig::default()
        };
        let service = ReservationService::new(InMemoryReservationStore::new(), config).unwrap();

        let view = service.create(OwnerId::generate(), None, None).unwrap();
        assert_eq!(view.network, "192.168.0.0/32");
    }

    #[test]
    fn test_detail_view_serializes_the_documented_contract() {
        let service = memory_service();
        let view = service
            .create(OwnerId::generate(), Some("192.168.0.0"), Some(30))
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        for key in [
            "network",
            "owner",
            "address",
            "prefixlen",
            "netmask",
            "hosts",
            "broadcast",
            "is_private",
        ] {
            assert!(json.get(key).is_some(), "detail view misses {key}");
        }
        assert_eq!(json["hosts"], serde_json::json!(["192.168.0.1", "192.168.0.2"]));
        assert_eq!(json["is_private"], serde_json::json!(true));
    }
}
