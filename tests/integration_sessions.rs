use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use assert_matches::assert_matches;
use mindgym::{
    games::{
        sequence::MAX_LEVEL, CardState, ColorMatch, MemoryPairs, PatternGame, QuestionBank,
        QuizAction, SchulteTable, ShapeHunt,
    },
    Callbacks, GameKind, HostEvent, Ignored, Phase, Session, Submission,
};

fn target_cells(session: &Session<ShapeHunt>) -> Vec<usize> {
    let grid = session.round().unwrap();
    grid.cells
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == grid.target)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn shape_hunt_clears_level_one() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(ShapeHunt::new(30, 500), 21, tx);
    session.start();

    let grid = session.round().unwrap();
    assert_eq!(grid.cells.len(), 20);
    let targets = target_cells(&session);
    assert_eq!(targets.len(), 3);

    for cell in targets {
        assert_matches!(session.submit_action(cell), Submission::Applied { delta: 10 });
    }
    assert_eq!(session.score(), 30);
    assert!(session.input_locked());
    assert_eq!(session.level().get(), 1);

    session.advance(499);
    assert_eq!(session.level().get(), 1);
    session.advance(1);
    assert_eq!(session.level().get(), 2);
    assert!(!session.input_locked());
    assert_eq!(session.round().map(|g| g.cells.len()), Some(24));
    assert_eq!(target_cells(&session).len(), 4);
    assert!(rx.try_recv().is_err());
}

#[test]
fn shape_hunt_miss_costs_five() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(ShapeHunt::new(30, 500), 8, tx);
    session.start();

    let targets = target_cells(&session);
    let miss = (0..20).find(|i| !targets.contains(i)).unwrap();

    session.submit_action(targets[0]);
    assert_matches!(session.submit_action(miss), Submission::Applied { delta: -5 });
    session.submit_action(targets[1]);
    session.submit_action(targets[2]);
    assert_eq!(session.score(), 25);
}

#[test]
fn score_never_goes_negative() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(ShapeHunt::new(30, 500), 5, tx);
    session.start();

    let targets = target_cells(&session);
    let miss = (0..20).find(|i| !targets.contains(i)).unwrap();
    assert_matches!(session.submit_action(miss), Submission::Applied { delta: 0 });
    assert_eq!(session.score(), 0);
}

#[test]
fn color_match_streak_bonus_and_reroll() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(ColorMatch::new(40), 2, tx);
    session.start();

    let mut deltas = Vec::new();
    for _ in 0..4 {
        let pair = *session.round().unwrap();
        match session.submit_action(pair.is_matching()) {
            Submission::Applied { delta } => deltas.push(delta),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(deltas, vec![10, 10, 10, 15]);
    assert_eq!(session.score(), 45);

    let pair = *session.round().unwrap();
    assert_matches!(
        session.submit_action(!pair.is_matching()),
        Submission::Applied { delta: -5 }
    );
    assert_eq!(session.game().streak(), 0);
}

#[test]
fn pattern_game_stops_at_level_cap() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(PatternGame::new(1000), 13, tx);
    session.start();
    assert_eq!(session.time_remaining(), None);

    let mut expected = 0;
    for level in 1..=MAX_LEVEL {
        assert_eq!(session.level().get(), level);
        let answer = session.round().unwrap().answer;
        session.submit_action(answer);
        expected += 15 * level;
        assert_eq!(session.score(), expected);
        session.advance(1000);
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![HostEvent::Completed {
            kind: GameKind::Logic,
            score: expected
        }]
    );
}

#[test]
fn pattern_game_wrong_answer_keeps_level() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(PatternGame::new(1000), 6, tx);
    session.start();
    session.submit_action(session.round().unwrap().answer);
    session.advance(1000);

    let pattern = session.round().unwrap().clone();
    let wrong = pattern
        .options
        .iter()
        .copied()
        .find(|&t| t != pattern.answer)
        .unwrap();
    session.submit_action(wrong);
    assert_eq!(session.score(), 5);
    assert_matches!(
        session.submit_action(pattern.answer),
        Submission::Ignored(Ignored::InputLocked)
    );
    session.advance(1000);
    assert_eq!(session.level().get(), 2);
}

#[test]
fn memory_pairs_perfect_game() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(MemoryPairs::new(60), 3, tx);
    session.start();

    let cards = session.round().unwrap().cards.clone();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, fruit) in cards.iter().enumerate() {
        if let Some(j) = cards.iter().skip(i + 1).position(|f| f == fruit) {
            pairs.push((i, i + 1 + j));
        }
    }
    assert_eq!(pairs.len(), 8);

    for (a, b) in pairs {
        session.submit_action(a);
        session.submit_action(b);
        session.advance(500);
    }
    assert!(session.game().all_matched());
    assert_eq!(session.score(), 160);
    assert_eq!(session.phase(), Phase::Active);

    session.advance(1000);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.final_score(), Some(160 - 8 * 2));
    assert_eq!(
        rx.try_recv().ok(),
        Some(HostEvent::Completed {
            kind: GameKind::Memory,
            score: 144
        })
    );
}

#[test]
fn memory_pairs_mismatch_flips_back() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(MemoryPairs::new(60), 10, tx);
    session.start();

    let cards = session.round().unwrap().cards.clone();
    let other = (1..cards.len()).find(|&i| cards[i] != cards[0]).unwrap();

    session.submit_action(0);
    assert_matches!(
        session.submit_action(0),
        Submission::Ignored(Ignored::Rejected)
    );
    session.submit_action(other);
    assert_eq!(session.game().card_state(0), Some(CardState::FaceUp));
    assert_matches!(
        session.submit_action(2),
        Submission::Ignored(Ignored::InputLocked)
    );

    session.advance(1000);
    assert_eq!(session.game().card_state(0), Some(CardState::FaceDown));
    assert_eq!(session.game().card_state(other), Some(CardState::FaceDown));
    assert_eq!(session.game().moves(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn schulte_wrong_and_cleared_numbers() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(SchulteTable::new(45, 500), 17, tx);
    session.start();

    assert_matches!(session.submit_action(1), Submission::Applied { delta: 5 });
    assert_matches!(session.submit_action(7), Submission::Applied { delta: -2 });
    assert_matches!(
        session.submit_action(1),
        Submission::Ignored(Ignored::Rejected)
    );
    assert_matches!(
        session.submit_action(26),
        Submission::Ignored(Ignored::Rejected)
    );
    assert_eq!(session.score(), 3);
    assert_eq!(session.game().target(), 2);
}

#[test]
fn quiz_runs_through_the_bank() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(QuestionBank::default(), 0, tx);
    session.start();

    for _ in 0..5 {
        let correct = session.round().unwrap().question.correct;
        session.submit_action(QuizAction::Answer(correct));
        session.submit_action(QuizAction::Continue);
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.final_score(), Some(125));
    assert_eq!(session.game().correct_answers(), 5);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn completion_fires_once_even_when_finished_twice() {
    let completions = Rc::new(RefCell::new(Vec::new()));
    let closes = Rc::new(RefCell::new(0));
    let host = {
        let completions = Rc::clone(&completions);
        let closes = Rc::clone(&closes);
        Callbacks::new(
            move |score| completions.borrow_mut().push(score),
            move || *closes.borrow_mut() += 1,
        )
    };

    let mut session = Session::seeded(SchulteTable::new(45, 500), 1, host);
    session.start();
    session.submit_action(1);
    session.finish();
    session.finish();
    session.advance(60_000);
    assert_matches!(
        session.submit_action(2),
        Submission::Ignored(Ignored::NotActive)
    );
    session.close();

    assert_eq!(*completions.borrow(), vec![5]);
    assert_eq!(*closes.borrow(), 1);
}

#[test]
fn closing_mid_delay_drops_the_pending_transition() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(PatternGame::new(1000), 2, tx);
    session.start();
    session.submit_action(session.round().unwrap().answer);
    assert!(session.input_locked());
    session.close();

    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![HostEvent::Closed(GameKind::Logic)]
    );
}

#[test]
fn tick_only_host_unlocks_pattern_feedback() {
    let (tx, _rx) = mpsc::channel();
    let mut session = Session::seeded(PatternGame::new(1000), 4, tx);
    session.start();

    session.submit_action(session.round().unwrap().answer);
    assert!(session.input_locked());
    session.tick();

    assert!(!session.input_locked());
    assert_eq!(session.level().get(), 2);
    let answer = session.round().unwrap().answer;
    assert_matches!(
        session.submit_action(answer),
        Submission::Applied { delta: 30 }
    );
}

#[test]
fn tick_only_host_moves_schulte_to_next_level() {
    let (tx, rx) = mpsc::channel();
    let mut session = Session::seeded(SchulteTable::new(45, 500), 9, tx);
    session.start();

    for n in 1..=25 {
        session.submit_action(n);
    }
    assert!(session.input_locked());
    session.tick();

    assert!(!session.input_locked());
    assert_eq!(session.level().get(), 2);
    assert_eq!(session.time_remaining(), Some(44));

    for _ in 0..44 {
        session.tick();
    }
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![HostEvent::Completed {
            kind: GameKind::Reading,
            score: 125
        }]
    );
}
