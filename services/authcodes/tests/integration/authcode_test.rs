use std::sync::Arc;

use linkcode_authcodes::domain::types::AUTHCODE_LEN;
use linkcode_authcodes::error::AuthCodeServiceError;
use linkcode_authcodes::usecase::authorization::{AuthorizationService, Issuance};

use crate::helpers::{
    FixedGenerator, MockAuthCodeRepo, SequenceGenerator, service, test_auth_code,
};

// ── Issuance ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_code_for_new_player() {
    let repo = MockAuthCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let svc = service(repo);

    let code = svc.issue_code("player-1").await.unwrap();

    assert_eq!(code.len(), AUTHCODE_LEN);
    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one pending code");
    assert_eq!(codes[0], test_auth_code(&code, "player-1"));
}

#[tokio::test]
async fn should_return_same_code_on_repeated_issue() {
    let svc = service(MockAuthCodeRepo::empty());

    let first = svc.issue_code("player-1").await.unwrap();
    let second = svc.issue_code("player-1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(svc.list_pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_whether_issuance_stored_a_code() {
    let svc = AuthorizationService {
        auth_codes: MockAuthCodeRepo::empty(),
        generator: FixedGenerator("a1b2c3d4"),
    };

    assert_eq!(
        svc.issue("player-1").await.unwrap(),
        Issuance::Created("a1b2c3d4".to_owned())
    );
    assert_eq!(
        svc.issue("player-1").await.unwrap(),
        Issuance::Existing("a1b2c3d4".to_owned())
    );
}

#[tokio::test]
async fn should_report_existing_code_when_issuance_race_is_lost() {
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-2")])
        .with_stale_player_lookups(1);
    let svc = AuthorizationService {
        auth_codes: repo,
        generator: FixedGenerator("ffffffff"),
    };

    assert_eq!(
        svc.issue("player-2").await.unwrap(),
        Issuance::Existing("a1b2c3d4".to_owned())
    );
}

#[tokio::test]
async fn should_issue_distinct_codes_per_player() {
    let svc = service(MockAuthCodeRepo::empty());

    let a = svc.issue_code("player-a").await.unwrap();
    let b = svc.issue_code("player-b").await.unwrap();

    assert_ne!(a, b);
    assert_eq!(svc.list_pending().await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_blank_player_id() {
    let svc = service(MockAuthCodeRepo::empty());

    for player_id in ["", "   "] {
        let result = svc.issue_code(player_id).await;
        assert!(
            matches!(result, Err(AuthCodeServiceError::InvalidPlayerId)),
            "expected InvalidPlayerId, got {result:?}"
        );
    }
    assert!(svc.list_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn should_return_winning_code_when_issuance_race_is_lost() {
    // Another issuer stored "a1b2c3d4" after our initial lookup missed it.
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-2")])
        .with_stale_player_lookups(1);
    let codes_handle = repo.codes_handle();
    let svc = AuthorizationService {
        auth_codes: repo,
        generator: FixedGenerator("ffffffff"),
    };

    let code = svc.issue_code("player-2").await.unwrap();

    assert_eq!(code, "a1b2c3d4");
    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "no second code may exist for the player");
}

#[tokio::test]
async fn should_regenerate_code_on_collision_with_other_player() {
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-1")]);
    let svc = AuthorizationService {
        auth_codes: repo,
        generator: SequenceGenerator::new(&["a1b2c3d4", "0badc0de"]),
    };

    let code = svc.issue_code("player-3").await.unwrap();

    assert_eq!(code, "0badc0de");
    assert_eq!(
        svc.get_player_id("a1b2c3d4").await.unwrap().as_deref(),
        Some("player-1"),
        "existing code must stay bound to its player"
    );
}

#[tokio::test]
async fn should_fail_when_every_attempt_collides() {
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-1")]);
    let svc = AuthorizationService {
        auth_codes: repo,
        generator: FixedGenerator("a1b2c3d4"),
    };

    let result = svc.issue_code("player-3").await;

    assert!(
        matches!(result, Err(AuthCodeServiceError::IssuanceFailed)),
        "expected IssuanceFailed, got {result:?}"
    );
    assert_eq!(svc.list_pending().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_converge_concurrent_issuance_on_one_code() {
    let repo = MockAuthCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let svc = Arc::new(service(repo));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.issue_code("player-2").await })
        })
        .collect();
    let results = futures::future::join_all(tasks).await;

    let codes: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();
    assert!(codes.windows(2).all(|w| w[0] == w[1]), "got {codes:?}");
    let stored = codes_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].code, codes[0]);
}

// ── Redemption ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_authorize_code_exactly_once() {
    let svc = service(MockAuthCodeRepo::empty());

    let code = svc.issue_code("player-1").await.unwrap();
    assert_eq!(svc.issue_code("player-1").await.unwrap(), code);

    assert_eq!(
        svc.authorize(&code).await.unwrap().as_deref(),
        Some("player-1")
    );
    assert_eq!(svc.authorize(&code).await.unwrap(), None);
}

#[tokio::test]
async fn should_clear_lookups_after_redemption() {
    let svc = service(MockAuthCodeRepo::empty());
    let code = svc.issue_code("player-1").await.unwrap();

    svc.authorize(&code).await.unwrap();

    assert_eq!(svc.get_auth_code("player-1").await.unwrap(), None);
    assert_eq!(svc.get_player_id(&code).await.unwrap(), None);
}

#[tokio::test]
async fn should_issue_fresh_code_after_redemption() {
    let svc = AuthorizationService {
        auth_codes: MockAuthCodeRepo::empty(),
        generator: SequenceGenerator::new(&["11111111", "22222222"]),
    };

    let first = svc.issue_code("player-1").await.unwrap();
    svc.authorize(&first).await.unwrap();
    let second = svc.issue_code("player-1").await.unwrap();

    assert_eq!(first, "11111111");
    assert_eq!(second, "22222222");
}

#[tokio::test]
async fn should_reject_unknown_code() {
    let svc = service(MockAuthCodeRepo::empty());

    assert_eq!(svc.authorize("nonexistent").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_redeem_once_under_concurrent_authorize() {
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-1")]);
    let svc = Arc::new(service(repo));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.authorize("a1b2c3d4").await })
        })
        .collect();
    let results = futures::future::join_all(tasks).await;

    let successes = results
        .into_iter()
        .filter_map(|r| r.unwrap().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(successes, vec!["player-1".to_owned()]);
}

// ── Lookup and removal ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_look_up_pending_code_both_ways() {
    let svc = service(MockAuthCodeRepo::new(vec![test_auth_code(
        "a1b2c3d4", "player-1",
    )]));

    assert_eq!(
        svc.get_auth_code("player-1").await.unwrap().as_deref(),
        Some("a1b2c3d4")
    );
    assert_eq!(
        svc.get_player_id("a1b2c3d4").await.unwrap().as_deref(),
        Some("player-1")
    );
    assert_eq!(svc.get_auth_code("player-9").await.unwrap(), None);
    assert_eq!(svc.get_player_id("deadbeef").await.unwrap(), None);
}

#[tokio::test]
async fn should_remove_code_idempotently() {
    let repo = MockAuthCodeRepo::new(vec![test_auth_code("a1b2c3d4", "player-1")]);
    let codes_handle = repo.codes_handle();
    let svc = service(repo);

    svc.remove_code("a1b2c3d4").await.unwrap();
    svc.remove_code("a1b2c3d4").await.unwrap();

    assert!(codes_handle.lock().unwrap().is_empty());
    assert_eq!(svc.authorize("a1b2c3d4").await.unwrap(), None);
}

#[tokio::test]
async fn should_list_all_pending_codes() {
    let svc = service(MockAuthCodeRepo::new(vec![
        test_auth_code("a1b2c3d4", "player-1"),
        test_auth_code("0badc0de", "player-2"),
    ]));

    let pending = svc.list_pending().await.unwrap();

    assert_eq!(pending.len(), 2);
    assert!(pending.contains(&test_auth_code("0badc0de", "player-2")));
}

// ── Storage failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_propagate_storage_errors() {
    let svc = service(MockAuthCodeRepo::unavailable());

    assert!(matches!(
        svc.issue_code("player-1").await,
        Err(AuthCodeServiceError::Storage(_))
    ));
    assert!(matches!(
        svc.authorize("a1b2c3d4").await,
        Err(AuthCodeServiceError::Storage(_))
    ));
    assert!(matches!(
        svc.remove_code("a1b2c3d4").await,
        Err(AuthCodeServiceError::Storage(_))
    ));
    assert!(matches!(
        svc.list_pending().await,
        Err(AuthCodeServiceError::Storage(_))
    ));
}
