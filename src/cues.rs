//! Audio and haptic cues
//!
//! The simulation only names the cue; the presentation layer decides how it
//! sounds or feels by implementing `CueSink`.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, PlayOutcome, PlayResult};

/// Sound effect tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Ball leaves the quarterback's hand
    Throw,
    /// Quarterback brought down
    Sack,
    /// Score!
    Touchdown,
}

impl AudioCue {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioCue::Throw => "throw",
            AudioCue::Sack => "sack",
            AudioCue::Touchdown => "touchdown",
        }
    }
}

/// Vibration strength tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticCue {
    Light,
    Medium,
    Heavy,
    Success,
    Error,
}

impl HapticCue {
    pub fn as_str(self) -> &'static str {
        match self {
            HapticCue::Light => "light",
            HapticCue::Medium => "medium",
            HapticCue::Heavy => "heavy",
            HapticCue::Success => "success",
            HapticCue::Error => "error",
        }
    }
}

/// Receiver of cues, implemented by the presentation layer
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
    fn haptic(&mut self, cue: HapticCue);
}

/// Cues that accompany a resolved play
pub fn cues_for(result: &PlayResult, outcome: &PlayOutcome) -> (Option<AudioCue>, HapticCue) {
    let audio = match (result, outcome) {
        (_, PlayOutcome::Touchdown { .. }) => Some(AudioCue::Touchdown),
        (PlayResult::Sack { .. }, _) => Some(AudioCue::Sack),
        _ => None,
    };
    let haptic = match outcome {
        PlayOutcome::Touchdown { .. } | PlayOutcome::FirstDown { .. } => HapticCue::Success,
        PlayOutcome::ShortCompletion { .. } => HapticCue::Medium,
        PlayOutcome::Incomplete { .. } => HapticCue::Light,
        PlayOutcome::Sack { .. } => HapticCue::Heavy,
        PlayOutcome::Interception { .. } | PlayOutcome::TurnoverOnDowns => HapticCue::Error,
    };
    (audio, haptic)
}

/// Forward the cue events in `events` to `sink`
pub fn dispatch_cues(events: &[GameEvent], sink: &mut impl CueSink) {
    for event in events {
        match event {
            GameEvent::Audio(cue) => sink.play(*cue),
            GameEvent::Haptic(cue) => sink.haptic(*cue),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        audio: Vec<AudioCue>,
        haptics: Vec<HapticCue>,
    }

    impl CueSink for Recorder {
        fn play(&mut self, cue: AudioCue) {
            self.audio.push(cue);
        }

        fn haptic(&mut self, cue: HapticCue) {
            self.haptics.push(cue);
        }
    }

    #[test]
    fn test_sack_turnover_still_sounds_like_a_sack() {
        let (audio, haptic) = cues_for(
            &PlayResult::Sack { tackle_z: -20.0 },
            &PlayOutcome::TurnoverOnDowns,
        );
        assert_eq!(audio, Some(AudioCue::Sack));
        assert_eq!(haptic, HapticCue::Error);
    }

    #[test]
    fn test_touchdown_cues() {
        let (audio, haptic) = cues_for(
            &PlayResult::Catch { z: 23.0 },
            &PlayOutcome::Touchdown { points: 7, score: 7 },
        );
        assert_eq!(audio, Some(AudioCue::Touchdown));
        assert_eq!(haptic, HapticCue::Success);
    }

    #[test]
    fn test_dispatch_only_forwards_cues() {
        let events = vec![
            GameEvent::Audio(AudioCue::Throw),
            GameEvent::Haptic(HapticCue::Light),
            GameEvent::Outcome(PlayOutcome::Incomplete { down: 2 }),
        ];
        let mut sink = Recorder::default();
        dispatch_cues(&events, &mut sink);
        assert_eq!(sink.audio, vec![AudioCue::Throw]);
        assert_eq!(sink.haptics, vec![HapticCue::Light]);
    }

    #[test]
    fn test_tags() {
        assert_eq!(AudioCue::Throw.as_str(), "throw");
        assert_eq!(HapticCue::Heavy.as_str(), "heavy");
    }
}
