//! The staged intro sequence.
//!
//! `Words` cycles a greeting until a minimum count has been shown, then a
//! curtain covers the viewport, reveals it again, and the sequence is done.
//! Runs once per page load; `Finished` fires exactly once per instance.

use crate::constants::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    Words,
    Covering,
    Revealing,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEvent {
    WordChanged(usize),
    CoverStarted,
    RevealStarted,
    Finished,
}

#[derive(Clone, Debug)]
pub struct IntroConfig {
    pub words: Vec<String>,
    pub cycle_ms: f64,
    pub min_words: u32,
    pub cover_ms: f64,
    pub reveal_ms: f64,
    pub settle_ms: f64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            words: [
                "Hello", "Hola", "Bonjour", "Ciao", "Olá", "नमस्ते", "こんにちは", "안녕하세요",
                "مرحبا", "您好",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            cycle_ms: INTRO_CYCLE_MS,
            min_words: INTRO_MIN_WORDS,
            cover_ms: INTRO_COVER_MS,
            reveal_ms: INTRO_REVEAL_MS,
            settle_ms: INTRO_SETTLE_MS,
        }
    }
}

pub type IntroEvents = SmallVec<[IntroEvent; 4]>;

pub struct IntroSequence {
    config: IntroConfig,
    phase: IntroPhase,
    word_idx: usize,
    words_shown: u32,
    phase_elapsed_ms: f64,
    finished_emitted: bool,
}

impl IntroSequence {
    pub fn new(config: IntroConfig) -> Self {
        Self {
            config,
            phase: IntroPhase::Words,
            word_idx: 0,
            // words[0] is on screen from the first paint
            words_shown: 1,
            phase_elapsed_ms: 0.0,
            finished_emitted: false,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn current_word(&self) -> &str {
        self.config
            .words
            .get(self.word_idx)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn cover_ms(&self) -> f64 {
        self.config.cover_ms
    }

    pub fn reveal_ms(&self) -> f64 {
        self.config.reveal_ms
    }

    /// Advances the sequence, returning the events that fired this tick.
    pub fn tick(&mut self, dt_ms: f64) -> IntroEvents {
        let mut events = IntroEvents::new();
        if self.phase == IntroPhase::Done {
            return events;
        }
        self.phase_elapsed_ms += dt_ms.max(0.0);

        if self.phase == IntroPhase::Words {
            let word_count = self.config.words.len().max(1);
            while self.phase == IntroPhase::Words && self.phase_elapsed_ms >= self.config.cycle_ms {
                self.phase_elapsed_ms -= self.config.cycle_ms;
                self.word_idx = (self.word_idx + 1) % word_count;
                self.words_shown += 1;
                events.push(IntroEvent::WordChanged(self.word_idx));
                if self.words_shown >= self.config.min_words {
                    self.enter(IntroPhase::Covering);
                    events.push(IntroEvent::CoverStarted);
                }
            }
            return events;
        }

        if self.phase == IntroPhase::Covering
            && self.phase_elapsed_ms >= self.config.cover_ms + self.config.settle_ms
        {
            self.enter(IntroPhase::Revealing);
            events.push(IntroEvent::RevealStarted);
            return events;
        }

        if self.phase == IntroPhase::Revealing
            && self.phase_elapsed_ms >= self.config.reveal_ms + self.config.settle_ms
        {
            self.enter(IntroPhase::Done);
            if !self.finished_emitted {
                self.finished_emitted = true;
                events.push(IntroEvent::Finished);
            }
        }
        events
    }

    fn enter(&mut self, phase: IntroPhase) {
        self.phase = phase;
        self.phase_elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_cover(config: IntroConfig) -> (u32, Vec<IntroEvent>) {
        let mut seq = IntroSequence::new(config);
        let mut shown = 1; // the initial word
        let mut all = Vec::new();
        for _ in 0..200 {
            let events = seq.tick(110.0);
            for ev in &events {
                if let IntroEvent::WordChanged(_) = ev {
                    shown += 1;
                }
                all.push(*ev);
            }
            if seq.phase() != IntroPhase::Words {
                break;
            }
        }
        (shown, all)
    }

    #[test]
    fn exactly_min_words_shown_before_covering() {
        let (shown, events) = run_to_cover(IntroConfig::default());
        assert_eq!(shown, INTRO_MIN_WORDS);
        assert!(events.contains(&IntroEvent::CoverStarted));
    }

    #[test]
    fn short_word_lists_wrap_with_modulo() {
        let config = IntroConfig {
            words: vec!["a".into(), "b".into(), "c".into()],
            ..IntroConfig::default()
        };
        let (shown, events) = run_to_cover(config);
        assert_eq!(shown, INTRO_MIN_WORDS);
        // Indices wrapped: the last change lands on (min_words - 1) % 3.
        let last_idx = events
            .iter()
            .filter_map(|e| match e {
                IntroEvent::WordChanged(i) => Some(*i),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(last_idx, ((INTRO_MIN_WORDS - 1) % 3) as usize);
    }

    #[test]
    fn finished_fires_exactly_once() {
        let mut seq = IntroSequence::new(IntroConfig::default());
        let mut finished = 0;
        for _ in 0..500 {
            for ev in seq.tick(50.0) {
                if ev == IntroEvent::Finished {
                    finished += 1;
                }
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(seq.phase(), IntroPhase::Done);
    }

    #[test]
    fn phases_advance_in_order() {
        let mut seq = IntroSequence::new(IntroConfig::default());
        let mut order = Vec::new();
        for _ in 0..500 {
            for ev in seq.tick(25.0) {
                match ev {
                    IntroEvent::CoverStarted => order.push("cover"),
                    IntroEvent::RevealStarted => order.push("reveal"),
                    IntroEvent::Finished => order.push("done"),
                    _ => {}
                }
            }
        }
        assert_eq!(order, vec!["cover", "reveal", "done"]);
    }
}
