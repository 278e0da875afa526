use std::fmt;

use serde::{Deserialize, Serialize};

/// Compute device an experiment samples and trains on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Cpu,
    Cuda(u32),
}

impl Device {
    /// Pick the preferred CUDA device if it exists, else the first CUDA
    /// device, else the CPU
    pub fn select(cuda_devices: u32, preferred: u32) -> Self {
        if preferred < cuda_devices {
            Device::Cuda(preferred)
        } else if cuda_devices > 0 {
            Device::Cuda(0)
        } else {
            Device::Cpu
        }
    }

    /// Name understood by the training framework (`cuda:1`)
    pub fn torch_name(&self) -> String {
        match self {
            Device::Cpu => "cpu".to_string(),
            Device::Cuda(index) => format!("cuda:{}", index),
        }
    }

    /// Name used inside experiment names (`cuda1`)
    pub fn tag_name(&self) -> String {
        match self {
            Device::Cpu => "cpu".to_string(),
            Device::Cuda(index) => format!("cuda{}", index),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.torch_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_selection() {
        assert_eq!(Device::select(2, 1), Device::Cuda(1));
        assert_eq!(Device::select(1, 1), Device::Cuda(0));
        assert_eq!(Device::select(0, 1), Device::Cpu);
        assert_eq!(Device::select(4, 0), Device::Cuda(0));
    }

    #[test]
    fn test_device_names() {
        assert_eq!(Device::Cuda(1).torch_name(), "cuda:1");
        assert_eq!(Device::Cuda(1).tag_name(), "cuda1");
        assert_eq!(Device::Cpu.tag_name(), "cpu");
    }
}
