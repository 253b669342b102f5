use puckdeck_server::{
    error::GameError,
    game::{
        roster::{
            build_roster, compute_chemistry, is_card_eligible_for_slot, place_card, unassign_card,
            Roster, RosterCard,
        },
        types::{FieldSlot, Position},
    },
};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

fn card(position: Position) -> RosterCard {
    RosterCard {
        card_id: Uuid::new_v4(),
        position,
    }
}

fn put(roster: &Roster, c: RosterCard, slot: FieldSlot) -> Roster {
    place_card(roster, c, slot).expect("placement is valid").roster
}

#[test]
fn defenseman_only_fits_defense_slots() {
    use FieldSlot::*;
    for slot in FieldSlot::ALL {
        let expected = matches!(slot, LD | RD);
        assert_eq!(is_card_eligible_for_slot(Position::Defenseman, slot), expected, "{slot}");
    }
    assert!(is_card_eligible_for_slot(Position::Goaltender, G));
    assert!(!is_card_eligible_for_slot(Position::Goaltender, C));
    assert!(is_card_eligible_for_slot(Position::Forward, LW));
    assert!(!is_card_eligible_for_slot(Position::Forward, G));
}

#[test]
fn placing_ineligible_card_fails() {
    let err = place_card(&Roster::default(), card(Position::Goaltender), FieldSlot::C).unwrap_err();
    assert!(matches!(err, GameError::RoleMismatch(_)));
}

#[test]
fn slot_to_slot_move_swaps_eligible_occupant() {
    let a = card(Position::Forward);
    let b = card(Position::Forward);
    let r = put(&Roster::default(), a, FieldSlot::LW);
    let r = put(&r, b, FieldSlot::C);

    let placed = place_card(&r, a, FieldSlot::C).unwrap();
    assert_eq!(placed.roster.get(FieldSlot::C), Some(a));
    assert_eq!(placed.roster.get(FieldSlot::LW), Some(b));
    assert_eq!(placed.displaced, None);
}

#[test]
fn pool_card_displaces_occupant() {
    let a = card(Position::Forward);
    let b = card(Position::Forward);
    let r = put(&Roster::default(), b, FieldSlot::RW);

    let placed = place_card(&r, a, FieldSlot::RW).unwrap();
    assert_eq!(placed.roster.get(FieldSlot::RW), Some(a));
    assert_eq!(placed.displaced, Some(b.card_id));
    assert_eq!(placed.roster.slot_of(b.card_id), None);
}

#[test]
fn defense_pair_swaps_sides() {
    let d1 = card(Position::Defenseman);
    let d2 = card(Position::Defenseman);
    let r = put(&Roster::default(), d1, FieldSlot::LD);
    let r = put(&r, d2, FieldSlot::RD);
    let placed = place_card(&r, d1, FieldSlot::RD).unwrap();
    assert_eq!(placed.roster.get(FieldSlot::RD), Some(d1));
    assert_eq!(placed.roster.get(FieldSlot::LD), Some(d2));
    assert_eq!(placed.displaced, None);
}

#[test]
fn placing_card_in_its_own_slot_is_a_no_op() {
    let a = card(Position::Goaltender);
    let r = put(&Roster::default(), a, FieldSlot::G);
    let placed = place_card(&r, a, FieldSlot::G).unwrap();
    assert_eq!(placed.roster, r);
    assert_eq!(placed.displaced, None);
}

#[test]
fn card_never_holds_two_slots() {
    let a = card(Position::Forward);
    let r = put(&Roster::default(), a, FieldSlot::LW);
    let r = put(&r, a, FieldSlot::RW);
    assert_eq!(r.card_ids(), vec![a.card_id]);
    assert_eq!(r.slot_of(a.card_id), Some(FieldSlot::RW));
}

#[test]
fn unassign_frees_the_slot() {
    let a = card(Position::Forward);
    let r = put(&Roster::default(), a, FieldSlot::C);
    let r = unassign_card(&r, a.card_id);
    assert_eq!(r.get(FieldSlot::C), None);
    assert_eq!(compute_chemistry(&r), 0);

    // unknown card is a no-op
    assert_eq!(unassign_card(&r, Uuid::new_v4()), r);
}

fn full_line_up() -> (Roster, HashMap<Uuid, Position>) {
    let mut positions = HashMap::new();
    let mut r = Roster::default();
    for slot in FieldSlot::ALL {
        let c = card(slot.required_position());
        positions.insert(c.card_id, c.position);
        r = put(&r, c, slot);
    }
    (r, positions)
}

#[test]
fn chemistry_counts_filled_slots() {
    assert_eq!(compute_chemistry(&Roster::default()), 0);

    let (full, _) = full_line_up();
    assert_eq!(compute_chemistry(&full), 6);

    let partial = unassign_card(&full, full.get(FieldSlot::G).unwrap().card_id);
    assert_eq!(compute_chemistry(&partial), 5);
}

#[test]
fn build_roster_accepts_valid_assignment() {
    let (full, positions) = full_line_up();
    let record = full.to_record();
    let rebuilt = build_roster(&record, |id| positions.get(&id).copied()).unwrap();
    assert_eq!(rebuilt, full);
}

#[test]
fn build_roster_rejects_duplicates() {
    let a = card(Position::Forward);
    let record = BTreeMap::from([
        (FieldSlot::LW, Some(a.card_id)),
        (FieldSlot::C, Some(a.card_id)),
        (FieldSlot::G, None),
    ]);
    let err = build_roster(&record, |_| Some(Position::Forward)).unwrap_err();
    assert!(matches!(err, GameError::DuplicateAssignment(_)));
}

#[test]
fn build_roster_rejects_unknown_and_misplaced_cards() {
    let a = card(Position::Forward);
    let record = BTreeMap::from([(FieldSlot::C, Some(a.card_id))]);
    let err = build_roster(&record, |_| None).unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));

    let record = BTreeMap::from([(FieldSlot::G, Some(a.card_id))]);
    let err = build_roster(&record, |_| Some(Position::Forward)).unwrap_err();
    assert!(matches!(err, GameError::RoleMismatch(_)));
}

#[test]
fn record_lists_every_slot() {
    let record = Roster::default().to_record();
    assert_eq!(record.len(), 6);
    assert!(record.values().all(Option::is_none));
}
