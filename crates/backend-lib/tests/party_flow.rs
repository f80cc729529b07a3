// ============================
// crates/backend-lib/tests/party_flow.rs
// ============================
//! Service-level tests for the party subsystem: room lifecycle, passcodes,
//! the single-room invariant, scoring, and traffic-coupled pruning.
use std::collections::HashSet;
use std::sync::Arc;

use netguessr_backend_lib::error::AppError;
use netguessr_backend_lib::registry::PartyRegistry;
use netguessr_backend_lib::service::{PartyService, DEFAULT_PRUNE_AFTER_SECS};

fn service() -> (PartyService, Arc<PartyRegistry>) {
    let registry = Arc::new(PartyRegistry::new());
    let service = PartyService::new(registry.clone(), DEFAULT_PRUNE_AFTER_SECS);
    (service, registry)
}

#[test]
fn every_created_room_gets_a_distinct_five_letter_code() {
    let (service, registry) = service();
    let codes: HashSet<String> = (0..50)
        .map(|i| {
            service
                .create_room(&format!("user-{i}"), None, "", None)
                .room_code
        })
        .collect();

    assert_eq!(codes.len(), 50);
    assert_eq!(registry.party_count(), 50);
    for code in &codes {
        assert_eq!(code.len(), 5);
        assert!(code.chars().all(|c| c.is_ascii_alphabetic()));
    }
}

#[test]
fn joining_a_dead_code_is_not_found() {
    let (service, _registry) = service();
    let err = service
        .join_room("u1", None, "AAAAA", "", None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn passcodes_match_exactly_or_not_at_all() {
    let (service, _registry) = service();
    let gated = service.create_room("u1", None, "abc", None).room_code;
    let open = service.create_room("u2", None, "", None).room_code;

    assert!(matches!(
        service.join_room("u3", None, &gated, "", None),
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        service.join_room("u3", None, &gated, "xyz", None),
        Err(AppError::Unauthorized)
    ));
    service.join_room("u3", None, &gated, "abc", None).unwrap();

    assert!(matches!(
        service.join_room("u4", None, &open, "x", None),
        Err(AppError::Unauthorized)
    ));
    service.join_room("u4", None, &open, "", None).unwrap();
}

#[test]
fn creating_a_room_while_in_another_transfers_the_caller() {
    let (service, registry) = service();
    let first = service.create_room("anchor", None, "", None).room_code;
    service.join_room("mover", None, &first, "", None).unwrap();

    let second = service
        .create_room("mover", Some(&first), "", None)
        .room_code;

    // the mover is gone from the first room and present in the new one
    let first_info = service.room_info("anchor", &first).unwrap();
    assert_eq!(first_info.leaderboard.len(), 1);
    let second_info = service.room_info("mover", &second).unwrap();
    assert_eq!(second_info.leaderboard.len(), 1);
    assert!(matches!(
        service.room_info("mover", &first),
        Err(AppError::NotFound(_))
    ));
    assert_eq!(registry.party_count(), 2);
}

#[test]
fn transferring_out_the_last_member_reaps_the_room() {
    let (service, _registry) = service();
    let first = service.create_room("solo", None, "", None).room_code;
    let _second = service.create_room("solo", Some(&first), "", None);

    // the emptied room's code is dead to later joins
    assert!(matches!(
        service.join_room("u2", None, &first, "", None),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn leaving_is_idempotent_and_reaps_emptied_rooms() {
    let (service, registry) = service();
    let code = service.create_room("u1", None, "", None).room_code;

    service.leave_room("u1", &code);
    assert_eq!(registry.party_count(), 0);

    // already gone: still not an error
    service.leave_room("u1", &code);
    service.leave_room("u1", "ZZZZZ");
}

#[test]
fn rejoining_discards_the_stale_score() {
    let (service, _registry) = service();
    let code = service.create_room("anchor", None, "", None).room_code;
    service
        .join_room("u2", None, &code, "", Some("Bea"))
        .unwrap();

    service.submit_score("u2", &code, 5);
    assert_eq!(service.room_info("u2", &code).unwrap().caller_score, 5);

    service.leave_room("u2", &code);
    service
        .join_room("u2", None, &code, "", Some("Bea"))
        .unwrap();
    assert_eq!(service.room_info("u2", &code).unwrap().caller_score, 0);
}

#[test]
fn scores_never_go_observably_negative() {
    let (service, _registry) = service();
    let code = service.create_room("u1", None, "", None).room_code;

    service.submit_score("u1", &code, -10);
    assert_eq!(service.room_info("u1", &code).unwrap().caller_score, 0);

    service.submit_score("u1", &code, 3);
    service.submit_score("u1", &code, -5);
    assert_eq!(service.room_info("u1", &code).unwrap().caller_score, 3);
}

#[test]
fn submitting_for_a_dead_room_or_absent_member_is_a_no_op() {
    let (service, _registry) = service();
    let code = service.create_room("u1", None, "", None).room_code;

    service.submit_score("stranger", &code, 7);
    service.submit_score("u1", "ZZZZZ", 7);
    assert_eq!(service.room_info("u1", &code).unwrap().caller_score, 0);
}

#[test]
fn room_info_requires_membership() {
    let (service, _registry) = service();
    let code = service.create_room("u1", None, "", None).room_code;
    assert!(matches!(
        service.room_info("stranger", &code),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn end_to_end_party_scenario() {
    let (service, _registry) = service();

    let code = service
        .create_room("u1", None, "abc", Some("U1"))
        .room_code;

    assert!(matches!(
        service.join_room("u2", None, &code, "xyz", Some("U2")),
        Err(AppError::Unauthorized)
    ));
    service
        .join_room("u2", None, &code, "abc", Some("U2"))
        .unwrap();

    service.submit_score("u1", &code, 3);
    service.submit_score("u2", &code, 5);

    let info = service.room_info("u1", &code).unwrap();
    assert_eq!(info.caller_score, 3);
    let order: Vec<(&str, i64)> = info
        .leaderboard
        .iter()
        .map(|r| (r.display_name.as_str(), r.score))
        .collect();
    assert_eq!(order, vec![("U2", 5), ("U1", 3)]);
}

/// Pruning rides on score submissions and nothing else. A quiet party is
/// never reaped, no matter how long it sits idle. This is the documented
/// trade-off, not a bug.
#[test]
fn party_with_no_submissions_is_never_pruned() {
    let registry = Arc::new(PartyRegistry::new());
    // 1-second threshold so the test can actually cross it
    let service = PartyService::new(registry.clone(), 1);

    let code = service.create_room("u1", None, "", Some("U1")).room_code;
    service
        .join_room("u2", None, &code, "", Some("U2"))
        .unwrap();

    std::thread::sleep(std::time::Duration::from_millis(1300));

    // both members are long past the threshold, but with no submissions
    // nothing has pruned them
    let info = service.room_info("u2", &code).unwrap();
    assert_eq!(info.leaderboard.len(), 2);

    // the first submission doubles as the sweep: the submitter was just
    // touched and survives, the idle member goes, as does their room slot
    service.submit_score("u2", &code, 5);
    let info = service.room_info("u2", &code).unwrap();
    assert_eq!(info.leaderboard.len(), 1);
    assert_eq!(info.leaderboard[0].display_name, "U2");
    assert!(matches!(
        service.room_info("u1", &code),
        Err(AppError::NotFound(_))
    ));
}
