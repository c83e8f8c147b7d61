use std::time::Duration;

use crate::app::{ClarityError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderState {
    pub phrase_index: usize,
    /// Number of characters of the current phrase currently shown.
    pub char_index: usize,
    pub deleting: bool,
}

/// One displayed string and how long it stays before the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderTiming {
    pub typing_interval: Duration,
    /// Hold time once a phrase is fully typed.
    pub pause: Duration,
}

impl PlaceholderTiming {
    /// Deleting runs at twice the typing speed.
    pub fn deleting_interval(&self) -> Duration {
        self.typing_interval / 2
    }

    /// Delay of the hold frame, so the full phrase stays up for `pause`.
    pub fn hold_delay(&self) -> Duration {
        self.pause.saturating_sub(self.typing_interval)
    }
}

impl Default for PlaceholderTiming {
    fn default() -> Self {
        Self {
            typing_interval: Duration::from_millis(80),
            pause: Duration::from_millis(1000),
        }
    }
}

/// Infinite sequence of placeholder frames.
///
/// For each phrase of `n` characters it yields `n` typing frames, one hold
/// frame of the full phrase, and `n` deleting frames ending at the empty
/// string, then moves on to the next phrase (wrapping). The sequence is
/// periodic with `sum(2 * n + 1)` frames.
#[derive(Debug, Clone)]
pub struct PlaceholderCycler {
    phrases: Vec<String>,
    lengths: Vec<usize>,
    timing: PlaceholderTiming,
    state: PlaceholderState,
}

impl PlaceholderCycler {
    pub fn new(phrases: Vec<String>, timing: PlaceholderTiming) -> Result<Self> {
        if phrases.is_empty() {
            return Err(ClarityError::InvalidPhrases(
                "at least one phrase is required".into(),
            ));
        }
        if let Some(pos) = phrases.iter().position(|p| p.is_empty()) {
            return Err(ClarityError::InvalidPhrases(format!(
                "phrase {} is empty",
                pos
            )));
        }

        let lengths = phrases.iter().map(|p| p.chars().count()).collect();
        Ok(Self {
            phrases,
            lengths,
            timing,
            state: PlaceholderState::default(),
        })
    }

    pub fn state(&self) -> PlaceholderState {
        self.state
    }

    pub fn timing(&self) -> PlaceholderTiming {
        self.timing
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Number of frames before the sequence repeats.
    pub fn period(&self) -> usize {
        self.lengths.iter().map(|n| 2 * n + 1).sum()
    }

    /// Restart from the first character of the first phrase.
    pub fn reset(&mut self) {
        self.state = PlaceholderState::default();
    }

    fn visible_text(&self) -> String {
        self.phrases[self.state.phrase_index]
            .chars()
            .take(self.state.char_index)
            .collect()
    }

    fn frame(&self, delay: Duration) -> PlaceholderFrame {
        PlaceholderFrame {
            text: self.visible_text(),
            delay,
        }
    }
}

impl Iterator for PlaceholderCycler {
    type Item = PlaceholderFrame;

    fn next(&mut self) -> Option<PlaceholderFrame> {
        let len = self.lengths[self.state.phrase_index];

        let frame = if !self.state.deleting {
            if self.state.char_index < len {
                self.state.char_index += 1;
                self.frame(self.timing.typing_interval)
            } else {
                // The last typing frame already showed the full phrase.
                self.state.deleting = true;
                self.frame(self.timing.hold_delay())
            }
        } else {
            // char_index > 0 here: reaching zero flips back to typing below.
            self.state.char_index -= 1;
            let frame = self.frame(self.timing.deleting_interval());
            if self.state.char_index == 0 {
                self.state.deleting = false;
                self.state.phrase_index = (self.state.phrase_index + 1) % self.phrases.len();
            }
            frame
        };

        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn cycler(phrases: &[&str]) -> PlaceholderCycler {
        PlaceholderCycler::new(
            phrases.iter().map(|p| p.to_string()).collect(),
            PlaceholderTiming {
                typing_interval: ms(100),
                pause: ms(1000),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_list_and_empty_phrase() {
        assert!(PlaceholderCycler::new(vec![], PlaceholderTiming::default()).is_err());
        assert!(PlaceholderCycler::new(
            vec!["ok".into(), String::new()],
            PlaceholderTiming::default()
        )
        .is_err());
    }

    #[test]
    fn test_types_pauses_deletes_then_advances() {
        let frames: Vec<_> = cycler(&["ab", "c"]).take(8).collect();
        let texts: Vec<&str> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "ab", "ab", "a", "", "c", "c", ""]);

        let delays: Vec<Duration> = frames.iter().map(|f| f.delay).collect();
        assert_eq!(
            delays,
            vec![ms(100), ms(100), ms(900), ms(50), ms(50), ms(100), ms(900), ms(50)]
        );
    }

    #[test]
    fn test_single_phrase_cycles_on_itself() {
        let frames: Vec<_> = cycler(&["hi"]).take(10).map(|f| f.text).collect();
        assert_eq!(
            frames,
            vec!["h", "hi", "hi", "h", "", "h", "hi", "hi", "h", ""]
        );
    }

    #[test]
    fn test_multibyte_phrases() {
        let texts: Vec<_> = cycler(&["né"]).take(5).map(|f| f.text).collect();
        assert_eq!(texts, vec!["n", "né", "né", "n", ""]);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut c = cycler(&["ab", "cd"]);
        let first: Vec<_> = c.by_ref().take(3).collect();
        c.next();
        c.reset();
        assert_eq!(c.state(), PlaceholderState::default());
        let again: Vec<_> = c.take(3).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_full_phrase_is_held_for_pause() {
        let frames: Vec<_> = cycler(&["abc"]).take(4).collect();
        // "abc" appears on the third frame and is replaced after the fourth.
        assert_eq!(frames[2].text, "abc");
        assert_eq!(frames[3].text, "abc");
        assert_eq!(frames[2].delay + frames[3].delay, ms(1000));

        let short_pause = PlaceholderTiming {
            typing_interval: ms(100),
            pause: ms(40),
        };
        assert_eq!(short_pause.hold_delay(), Duration::ZERO);
    }

    fn phrase_list() -> impl Strategy<Value = Vec<String>> {
        vec("\\PC{1,12}", 1..5)
    }

    proptest! {
        #[test]
        fn sequence_is_periodic(phrases in phrase_list()) {
            let c = PlaceholderCycler::new(phrases, PlaceholderTiming::default()).unwrap();
            let period = c.period();
            let expected: usize = c.phrases().iter().map(|p| 2 * p.chars().count() + 1).sum();
            prop_assert_eq!(period, expected);

            let frames: Vec<_> = c.take(period * 2).collect();
            prop_assert_eq!(&frames[..period], &frames[period..]);
        }

        #[test]
        fn char_index_stays_in_bounds(phrases in phrase_list()) {
            let mut c = PlaceholderCycler::new(phrases, PlaceholderTiming::default()).unwrap();
            let mut prev = c.state();
            for _ in 0..c.period() * 2 {
                c.next();
                let state = c.state();
                let len = c.phrases()[state.phrase_index].chars().count();
                prop_assert!(state.char_index <= len);

                if state.deleting != prev.deleting {
                    if state.deleting {
                        let prev_len = c.phrases()[prev.phrase_index].chars().count();
                        prop_assert_eq!(prev.char_index, prev_len);
                    } else {
                        prop_assert_eq!(state.char_index, 0);
                    }
                }
                prev = state;
            }
        }
    }
}
