use std::fmt;

use serde::{Deserialize, Serialize};

/// VMAS scenarios covered by the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmasTask {
    BallPassage,
    BallTrajectory,
    BuzzWire,
    Dispersion,
    Dropout,
    Flocking,
    Football,
    GiveWay,
    JointPassage,
    JointPassageSize,
    MultiGiveWay,
    Navigation,
    Passage,
    ReverseTransport,
    Sampling,
    SimpleAdversary,
    SimpleCrypto,
    SimplePush,
    SimpleReference,
    SimpleSpeakerListener,
    SimpleSpread,
    SimpleTag,
    SimpleWorldComm,
    Transport,
    Wheel,
    WindFlocking,
}

impl VmasTask {
    pub const ALL: [VmasTask; 26] = [
        VmasTask::BallPassage,
        VmasTask::BallTrajectory,
        VmasTask::BuzzWire,
        VmasTask::Dispersion,
        VmasTask::Dropout,
        VmasTask::Flocking,
        VmasTask::Football,
        VmasTask::GiveWay,
        VmasTask::JointPassage,
        VmasTask::JointPassageSize,
        VmasTask::MultiGiveWay,
        VmasTask::Navigation,
        VmasTask::Passage,
        VmasTask::ReverseTransport,
        VmasTask::Sampling,
        VmasTask::SimpleAdversary,
        VmasTask::SimpleCrypto,
        VmasTask::SimplePush,
        VmasTask::SimpleReference,
        VmasTask::SimpleSpeakerListener,
        VmasTask::SimpleSpread,
        VmasTask::SimpleTag,
        VmasTask::SimpleWorldComm,
        VmasTask::Transport,
        VmasTask::Wheel,
        VmasTask::WindFlocking,
    ];

    /// Lower-case scenario name as used in experiment names
    pub fn as_str(&self) -> &'static str {
        match self {
            VmasTask::BallPassage => "ball_passage",
            VmasTask::BallTrajectory => "ball_trajectory",
            VmasTask::BuzzWire => "buzz_wire",
            VmasTask::Dispersion => "dispersion",
            VmasTask::Dropout => "dropout",
            VmasTask::Flocking => "flocking",
            VmasTask::Football => "football",
            VmasTask::GiveWay => "give_way",
            VmasTask::JointPassage => "joint_passage",
            VmasTask::JointPassageSize => "joint_passage_size",
            VmasTask::MultiGiveWay => "multi_give_way",
            VmasTask::Navigation => "navigation",
            VmasTask::Passage => "passage",
            VmasTask::ReverseTransport => "reverse_transport",
            VmasTask::Sampling => "sampling",
            VmasTask::SimpleAdversary => "simple_adversary",
            VmasTask::SimpleCrypto => "simple_crypto",
            VmasTask::SimplePush => "simple_push",
            VmasTask::SimpleReference => "simple_reference",
            VmasTask::SimpleSpeakerListener => "simple_speaker_listener",
            VmasTask::SimpleSpread => "simple_spread",
            VmasTask::SimpleTag => "simple_tag",
            VmasTask::SimpleWorldComm => "simple_world_comm",
            VmasTask::Transport => "transport",
            VmasTask::Wheel => "wheel",
            VmasTask::WindFlocking => "wind_flocking",
        }
    }
}

impl fmt::Display for VmasTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
