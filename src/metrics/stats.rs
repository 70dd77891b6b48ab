use std::fmt;
use std::path::Path;
use serde::{Serialize, Deserialize};

/// Point-in-time view of a brain's learning progress, for dashboards and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainStats {
    pub experience_count: usize,
    pub epsilon: f32,
    pub age: usize,
    pub forward_passes: usize,
    pub average_loss: Option<f32>,
    pub average_reward: Option<f32>,
    pub latest_reward: f32,
    pub learning: bool,
}

impl BrainStats {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the snapshot as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn optional(value: Option<f32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.6}", v))
}

impl fmt::Display for BrainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "experience replay size: {}", self.experience_count)?;
        writeln!(f, "exploration epsilon: {:.4}", self.epsilon)?;
        writeln!(f, "age: {}", self.age)?;
        writeln!(f, "forward passes: {}", self.forward_passes)?;
        writeln!(f, "average Q-learning loss: {}", optional(self.average_loss))?;
        writeln!(f, "smooth-ish reward: {}", optional(self.average_reward))?;
        writeln!(f, "latest reward: {}", self.latest_reward)?;
        write!(f, "learning: {}", self.learning)
    }
}
