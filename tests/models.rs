//! Tests for model-level parsing and derived state.

use copa_tournament::models::{
    Bombo, Country, KnockoutRound, NewTie, QualifyingRound, Tie, TieStage, TieState, TournamentError,
};
use uuid::Uuid;

#[test]
fn country_variants_normalize_to_one_value() {
    for raw in ["peru", "Perú", " PERU ", "perú"] {
        assert_eq!(Country::normalize(raw).unwrap(), Country::Peru, "{raw}");
    }
    assert_eq!(Country::normalize("Brazil").unwrap(), Country::Brasil);
    assert_eq!(Country::Peru.to_string(), "perú");
    assert_eq!(
        Country::normalize("Narnia"),
        Err(TournamentError::UnknownCountry("Narnia".to_string()))
    );
    assert_eq!(Country::all().len(), 10);
}

#[test]
fn country_round_trips_through_json() {
    let parsed: Country = serde_json::from_str("\"Peru\"").unwrap();
    assert_eq!(parsed, Country::Peru);
    assert_eq!(serde_json::to_string(&Country::Peru).unwrap(), "\"perú\"");
}

#[test]
fn bombo_and_round_bounds() {
    assert!(Bombo::new(0).is_err());
    assert_eq!(Bombo::new(4).unwrap().value(), 4);
    assert_eq!(Bombo::new(5), Err(TournamentError::InvalidBombo(5)));
    assert!(serde_json::from_str::<Bombo>("7").is_err());
    assert_eq!(QualifyingRound::try_from(3u8).unwrap(), QualifyingRound::Third);
    assert_eq!(QualifyingRound::try_from(4u8), Err(TournamentError::InvalidQualifyingRound(4)));
}

#[test]
fn new_tie_accepts_missing_single_match_flag() {
    let json = format!(
        r#"{{"stage":{{"kind":"knockout","round":"final"}},"first_team_id":"{}","second_team_id":"{}"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let new: NewTie = serde_json::from_str(&json).unwrap();
    assert_eq!(new.stage, TieStage::Knockout(KnockoutRound::Final));
    assert_eq!(new.is_single_match, None);
}

#[test]
fn fresh_tie_awaits_first_leg() {
    let tie = Tie::new(
        Uuid::new_v4(),
        TieStage::Qualifying(QualifyingRound::First),
        Uuid::new_v4(),
        Uuid::new_v4(),
        false,
    );
    assert_eq!(tie.state(), TieState::AwaitingFirstLeg);
    assert_eq!(tie.aggregate(), (0, 0));
    assert!(tie.involves(tie.second_team_id));
    assert_eq!(tie.opponent_of(tie.first_team_id), tie.second_team_id);
}
