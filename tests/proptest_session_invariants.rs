use proptest::prelude::*;
use typer::{Control, Phase, Session, TypingEvent, Viewport};

#[derive(Debug, Clone)]
enum Op {
    Key(char),
    Backspace,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::sample::select(vec!['a', 'b', ' ', 'c', '\n', 'é']).prop_map(Op::Key),
        1 => Just(Op::Backspace),
    ]
}

fn target_strategy() -> impl Strategy<Value = String> {
    "[a-c]{1,6}( [a-c]{1,6}){0,3}(\n[a-c]{1,6}){0,2}"
}

proptest! {
    #[test]
    fn percent_stays_in_range_and_moves_with_input(
        target in target_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut session = Session::new(&target, Viewport::new(80, 40)).unwrap();
        let target_len = target.chars().count();

        for op in ops {
            let before = session.percent_complete();
            let backspaces = session.backspaces();
            let typed_before = session.typed().len();

            let (event, is_backspace) = match op {
                Op::Key(c) => (TypingEvent::from(c), false),
                Op::Backspace => (TypingEvent::Backspace, true),
            };
            let control = session.handle_event(event);
            let after = session.percent_complete();

            prop_assert!((0.0..=1.0).contains(&after));
            prop_assert!(session.typed().len() <= target_len);
            if is_backspace {
                prop_assert!(after <= before);
                if typed_before == 0 {
                    prop_assert_eq!(session.backspaces(), backspaces);
                }
            } else {
                prop_assert!(after >= before);
            }

            prop_assert_eq!(session.is_complete(), session.typed().len() == target_len);
            if control == Control::Finish {
                prop_assert_eq!(session.phase(), Phase::Completed);
                break;
            }
        }
    }

    #[test]
    fn counters_never_decrease(
        target in target_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut session = Session::new(&target, Viewport::new(80, 40)).unwrap();
        let mut history_len = 0;

        for op in ops {
            let correct = session.correct_chars();
            let backspaces = session.backspaces();

            let event = match op {
                Op::Key(c) => TypingEvent::from(c),
                Op::Backspace => TypingEvent::Backspace,
            };
            session.handle_event(event);
            session.frame(std::time::Instant::now());

            prop_assert!(session.correct_chars() >= correct);
            prop_assert!(session.backspaces() >= backspaces);
            prop_assert!(session.wpm_history().len() >= history_len);
            history_len = session.wpm_history().len();
        }
    }

    #[test]
    fn typing_the_target_exactly_completes_on_last_char(target in target_strategy()) {
        let mut session = Session::new(&target, Viewport::new(80, 40)).unwrap();
        let chars: Vec<char> = target.chars().collect();

        for (idx, c) in chars.iter().enumerate() {
            prop_assert!(!session.is_complete());
            let control = session.handle_event(TypingEvent::from(*c));
            prop_assert_eq!(control == Control::Finish, idx == chars.len() - 1);
        }
        prop_assert!(session.is_complete());
        prop_assert_eq!(session.correct_chars(), chars.len());
    }
}
