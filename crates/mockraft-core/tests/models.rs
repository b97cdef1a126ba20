use mockraft_core::keys;
use mockraft_core::models::interview::{InterviewRecord, QuestionType, check_score};
use mockraft_core::models::user::UserId;

#[test]
fn user_id_is_trimmed() {
    let id = UserId::parse("  user_2abc  ").unwrap();
    assert_eq!(id.as_str(), "user_2abc");
}

#[test]
fn empty_user_id_is_missing_parameter() {
    let err = UserId::parse("   ").unwrap_err();
    assert_eq!(err.to_string(), "missing parameter: userId");
}

#[test]
fn user_id_rejects_path_separators() {
    assert!(UserId::parse("a/b").is_err());
    assert!(UserId::parse("a b").is_err());
    assert!(UserId::parse(&"x".repeat(129)).is_err());
}

#[test]
fn cache_keys_follow_naming_convention() {
    let id = UserId::parse("user_42").unwrap();
    assert_eq!(keys::mock_stats(&id), "mock_stats:user_42");
    assert_eq!(keys::interviews(&id), "interviews:user_42");
    assert_eq!(
        keys::user_cache_keys(&id),
        ["interviews:user_42".to_string(), "mock_stats:user_42".to_string()]
    );
}

#[test]
fn interview_keys_live_under_user_prefix() {
    let id = UserId::parse("user_42").unwrap();
    let interview = uuid::Uuid::nil();
    let key = keys::interview(&id, interview);
    assert!(key.starts_with(&keys::interviews_prefix(&id)));
    assert!(key.ends_with(".json"));
}

#[test]
fn stored_record_with_loose_fields_deserializes() {
    let json = serde_json::json!({
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "role": "SRE",
        "createdAt": "2026-01-05T09:30:00Z",
        "overallScore": "pending",
        "questions": [
            { "question": "Q1", "type": "technical", "answer": "A1",
              "analysis": { "score": 64, "feedback": "ok" } },
            { "question": "Q2", "type": "coding" },
            { "question": "Q3", "type": "system_design",
              "analysis": { "score": null } }
        ]
    });

    let record: InterviewRecord = serde_json::from_value(json).unwrap();

    assert_eq!(record.overall_score, None);
    assert!(!record.completed);
    assert_eq!(record.points, None);
    assert_eq!(record.questions[0].score(), Some(64.0));
    assert_eq!(record.questions[1].kind, "coding");
    assert_eq!(record.questions[1].question_type(), None);
    assert_eq!(
        record.questions[2].question_type(),
        Some(QuestionType::SystemDesign)
    );
    assert_eq!(record.questions[2].score(), None);
}

#[test]
fn type_tags_match_serde_names() {
    for kind in QuestionType::ALL {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, kind.as_str());
        assert_eq!(QuestionType::from_tag(kind.as_str()), Some(kind));
    }
    assert_eq!(QuestionType::from_tag("coding"), None);
}

#[test]
fn untracked_type_tag_survives_a_round_trip() {
    let json = serde_json::json!({
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "role": "SRE",
        "createdAt": "2026-01-05T09:30:00Z",
        "questions": [{ "question": "Reverse a list.", "type": "coding" }]
    });

    let record: InterviewRecord = serde_json::from_value(json).unwrap();
    let written = serde_json::to_value(&record).unwrap();

    assert_eq!(written["questions"][0]["type"], "coding");
}

#[test]
fn stored_scores_off_the_scale_read_as_absent() {
    let json = serde_json::json!({
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "role": "SRE",
        "createdAt": "2026-01-05T09:30:00Z",
        "overallScore": 150,
        "questions": [{ "question": "Q", "type": "technical",
                        "analysis": { "score": -3 } }]
    });

    let record: InterviewRecord = serde_json::from_value(json).unwrap();

    assert_eq!(record.overall_score, None);
    assert_eq!(record.questions[0].score(), None);
}

#[test]
fn scores_outside_scale_are_rejected() {
    assert_eq!(check_score("overallScore", 55.5).unwrap(), 55.5);
    assert!(check_score("overallScore", -1.0).is_err());
    assert!(check_score("overallScore", 100.1).is_err());
    assert!(check_score("overallScore", f64::NAN).is_err());
}
