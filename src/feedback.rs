//! Fire-and-forget feedback effects
//!
//! The simulation never talks to audio, haptics or UI directly. It pushes
//! [`Effect`]s into the state's outbox and the host drains them into a
//! [`FeedbackSink`] after each frame, filtered by the player's settings.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Hero flaps on touch
    Flap,
}

impl SoundEffect {
    /// Asset identifier understood by the audio collaborator
    pub fn id(&self) -> &'static str {
        match self {
            SoundEffect::Flap => "sfx_flap",
        }
    }
}

/// Restart control visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Hidden,
    Active,
}

/// Top-level visual nodes of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneNode {
    Hero,
    ScrollLayer,
    CloudLayer,
    ObstacleLayer,
    ScoreLabel,
    HighScoreLabel,
    RestartButton,
}

impl SceneNode {
    /// Every node the game-over shake applies to
    pub const TOP_LEVEL: [SceneNode; 7] = [
        SceneNode::Hero,
        SceneNode::ScrollLayer,
        SceneNode::CloudLayer,
        SceneNode::ObstacleLayer,
        SceneNode::ScoreLabel,
        SceneNode::HighScoreLabel,
        SceneNode::RestartButton,
    ];
}

/// A single feedback request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Sound(SoundEffect),
    HapticAlert,
    /// One-shot shake on a node
    Shake(SceneNode),
    RestartButton(ButtonState),
}

/// Host-side collaborator that plays effects
pub trait FeedbackSink {
    fn play_sound(&mut self, sound: SoundEffect, volume: f32);
    fn haptic_alert(&mut self);
    fn shake(&mut self, node: SceneNode);
    fn set_restart_button(&mut self, state: ButtonState);
}

/// Play effects through a sink, dropping the ones the settings disable.
/// The restart button is never filtered.
pub fn dispatch<I>(effects: I, settings: &Settings, sink: &mut dyn FeedbackSink)
where
    I: IntoIterator<Item = Effect>,
{
    for effect in effects {
        match effect {
            Effect::Sound(sound) => {
                let volume = settings.effective_sfx_volume();
                if volume > 0.0 {
                    sink.play_sound(sound, volume);
                }
            }
            Effect::HapticAlert => {
                if settings.haptics {
                    sink.haptic_alert();
                }
            }
            Effect::Shake(node) => {
                if settings.effective_screen_shake() {
                    sink.shake(node);
                }
            }
            Effect::RestartButton(state) => sink.set_restart_button(state),
        }
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn play_sound(&mut self, sound: SoundEffect, volume: f32) {
        log::trace!("play {} at {:.2}", sound.id(), volume);
    }

    fn haptic_alert(&mut self) {
        log::debug!("haptic alert");
    }

    fn shake(&mut self, node: SceneNode) {
        log::trace!("shake {:?}", node);
    }

    fn set_restart_button(&mut self, state: ButtonState) {
        log::debug!("restart button -> {:?}", state);
    }
}

/// Sink that records what reached it
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<Effect>,
}

impl FeedbackSink for RecordingSink {
    fn play_sound(&mut self, sound: SoundEffect, _volume: f32) {
        self.played.push(Effect::Sound(sound));
    }

    fn haptic_alert(&mut self) {
        self.played.push(Effect::HapticAlert);
    }

    fn shake(&mut self, node: SceneNode) {
        self.played.push(Effect::Shake(node));
    }

    fn set_restart_button(&mut self, state: ButtonState) {
        self.played.push(Effect::RestartButton(state));
    }
}
