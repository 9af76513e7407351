//! Round state machine for the guessing game.
//!
//! Everything here is plain Rust so the guessing rules can be exercised
//! host-side. The browser glue in the parent module owns the DOM, the audio
//! element, and the timers; it drives this machine and obeys its verdicts.
//!
//! Overlap control: every round fetch gets a generation token from
//! [`Engine::begin_fetch`]. Completions and deferred callbacks present their
//! token back, and anything stale — a slow response arriving after the user
//! moved on, a leftover timer — is discarded instead of mutating the
//! current round.

use crate::Track;
use crate::title::canonical_title;

/// Snippet window at the start of every round, in seconds.
pub const START_SNIPPET_SECS: u32 = 1;
/// The snippet window doubles per wrong guess but never exceeds this.
pub const MAX_SNIPPET_SECS: u32 = 16;
/// Delay before a resolved round (correct or revealed) advances to the next.
pub const ADVANCE_DELAY_MS: u32 = 3_000;
/// Transient notifications clear themselves after this long.
pub const NOTIFICATION_MS: u32 = 3_000;
/// One user-visible message covers every round-fetch failure mode.
pub const FETCH_ERROR_MSG: &str = "Failed to fetch a new song. Please try again.";

/// Verdict of one guess submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No round in progress; nothing to compare against.
    NoTrack,
    /// Canonical guess matched the canonical title. Carries the new score.
    Correct { score: u32 },
    /// Mismatch with attempts left. Carries the widened snippet window.
    Wrong { snippet_secs: u32 },
    /// Fourth consecutive miss: the round ends and the answer is exposed.
    Reveal { answer: String },
}

#[derive(Debug)]
pub struct Engine {
    track: Option<Track>,
    score: u32,
    wrong_guesses: u32,
    snippet_secs: u32,
    playing: bool,
    error: Option<&'static str>,
    generation: u64,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            track: None,
            score: 0,
            wrong_guesses: 0,
            snippet_secs: START_SNIPPET_SECS,
            playing: false,
            error: None,
            generation: 0,
        }
    }

    /// Open a new round fetch and return its generation token. Issuing a new
    /// token retires every outstanding completion and timer.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Token that deferred work must match to still apply.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install a fetched track, starting the round: snippet window back to
    /// one second, wrong-guess count to zero, error cleared, playback
    /// stopped. Returns false (and changes nothing) for a stale token.
    pub fn finish_fetch(&mut self, token: u64, track: Track) -> bool {
        if token != self.generation {
            return false;
        }
        self.track = Some(track);
        self.snippet_secs = START_SNIPPET_SECS;
        self.wrong_guesses = 0;
        self.playing = false;
        self.error = None;
        true
    }

    /// Record a failed round fetch. The previous round stays exactly as
    /// displayed; only the error line changes. No automatic retry. Returns
    /// false for a stale token.
    pub fn fetch_failed(&mut self, token: u64) -> bool {
        if token != self.generation {
            return false;
        }
        self.error = Some(FETCH_ERROR_MSG);
        true
    }

    /// Category change: score and round progress restart, and the bumped
    /// generation retires any in-flight fetch. The old track remains on
    /// display until the next fetch replaces it.
    pub fn reset_session(&mut self) {
        self.generation += 1;
        self.score = 0;
        self.wrong_guesses = 0;
        self.snippet_secs = START_SNIPPET_SECS;
        self.playing = false;
    }

    /// Judge one guess against the current track.
    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        let Some(track) = &self.track else {
            return GuessOutcome::NoTrack;
        };
        let answer = canonical_title(&track.title);
        if canonical_title(guess) == answer {
            self.score += 1;
            return GuessOutcome::Correct { score: self.score };
        }
        self.snippet_secs = (self.snippet_secs * 2).min(MAX_SNIPPET_SECS);
        // The round ends on the fourth consecutive miss: count reaches 3
        // before this increment.
        let last_chance_spent = self.wrong_guesses == 3;
        self.wrong_guesses += 1;
        if last_chance_spent {
            GuessOutcome::Reveal { answer }
        } else {
            GuessOutcome::Wrong {
                snippet_secs: self.snippet_secs,
            }
        }
    }

    /// Gate for snippet playback. Yields the playback window in milliseconds,
    /// or None while a snippet is already playing or no track is loaded —
    /// the caller must not touch the audio element in that case.
    pub fn start_snippet(&mut self) -> Option<u32> {
        if self.playing || self.track.is_none() {
            return None;
        }
        self.playing = true;
        Some(self.snippet_secs * 1_000)
    }

    /// Playback finished or was cut off; the play button re-arms.
    pub fn stop_snippet(&mut self) {
        self.playing = false;
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn snippet_secs(&self) -> u32 {
        self.snippet_secs
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
