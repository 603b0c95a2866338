use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::config::RollerConfig;

/// 骰子点数，取值 1..=6。
pub type Face = u8;

pub const FACES: u8 = 6;
/// 博饼每次摇六颗骰子。
pub const DICE_PER_ROLL: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum DiceError {
    InvalidLength { expected: usize, actual: usize },
    FaceOutOfRange { index: usize, value: u8 },
    UnknownRank { label: String },
    InvalidConfig { message: String },
}

impl std::fmt::Display for DiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiceError::InvalidLength { expected, actual } => {
                write!(f, "需要 {expected} 颗骰子，实际 {actual} 颗")
            }
            DiceError::FaceOutOfRange { index, value } => {
                write!(f, "第 {index} 颗骰子点数 {value} 不在 1..=6")
            }
            DiceError::UnknownRank { label } => write!(f, "未知名次: {label}"),
            DiceError::InvalidConfig { message } => write!(f, "配置无效: {message}"),
        }
    }
}

impl std::error::Error for DiceError {}

/// 每个点数出现的次数。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaceCounts([u8; FACES as usize]);

impl FaceCounts {
    /// 统计点数；超出 1..=6 的值不计入。
    pub fn from_faces(faces: &[Face]) -> Self {
        let mut counts = [0u8; FACES as usize];
        for &face in faces {
            if is_valid_face(face) {
                let slot = &mut counts[(face - 1) as usize];
                *slot = slot.saturating_add(1);
            }
        }
        Self(counts)
    }

    /// 点数 `face` 的个数，非法点数视为 0。
    pub fn count(&self, face: Face) -> u8 {
        if is_valid_face(face) {
            self.0[(face - 1) as usize]
        } else {
            0
        }
    }

    pub fn max_count(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&count| count as usize).sum()
    }

    /// 对堂：1 到 6 各出现一次。
    pub fn is_straight(&self) -> bool {
        self.0.iter().all(|&count| count == 1)
    }
}

pub fn is_valid_face(face: Face) -> bool {
    (1..=FACES).contains(&face)
}

/// 一次摇出的六颗骰子，构造时已校验。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct Roll([Face; DICE_PER_ROLL]);

impl Roll {
    pub fn new(faces: &[Face]) -> Result<Self, DiceError> {
        let dice: [Face; DICE_PER_ROLL] =
            faces.try_into().map_err(|_| DiceError::InvalidLength {
                expected: DICE_PER_ROLL,
                actual: faces.len(),
            })?;
        if let Some((index, &value)) = dice
            .iter()
            .enumerate()
            .find(|&(_, &face)| !is_valid_face(face))
        {
            return Err(DiceError::FaceOutOfRange { index, value });
        }
        Ok(Self(dice))
    }

    pub fn faces(&self) -> &[Face; DICE_PER_ROLL] {
        &self.0
    }

    pub fn face_counts(&self) -> FaceCounts {
        FaceCounts::from_faces(&self.0)
    }

    pub fn sorted(mut self) -> Self {
        self.0.sort_unstable();
        self
    }
}

impl<'de> Deserialize<'de> for Roll {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let faces = Vec::<Face>::deserialize(deserializer)?;
        Roll::new(&faces).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&[Face]> for Roll {
    type Error = DiceError;

    fn try_from(faces: &[Face]) -> Result<Self, Self::Error> {
        Roll::new(faces)
    }
}

/// 用 [0,1) 均匀数映射出一个点数：`1 + floor(u * 6)`。
fn face_from_unit(unit: f64) -> Face {
    let face = 1 + (unit * FACES as f64).floor() as u8;
    face.min(FACES)
}

/// 用给定随机源摇 `count` 颗骰子，结果升序。
pub fn roll_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Face> {
    let mut dice: Vec<Face> = (0..count).map(|_| face_from_unit(rng.gen::<f64>())).collect();
    dice.sort_unstable();
    dice
}

/// 使用线程随机源摇骰子。
pub fn roll_dice(times: usize) -> Vec<Face> {
    roll_with(&mut rand::thread_rng(), times)
}

pub struct DiceRoller {
    rng: SmallRng,
    dice_count: usize,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            dice_count: DICE_PER_ROLL,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            dice_count: DICE_PER_ROLL,
        }
    }

    pub fn from_config(config: &RollerConfig) -> Self {
        let roller = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        Self {
            dice_count: config.dice_count,
            ..roller
        }
    }

    pub fn dice_count(&self) -> usize {
        self.dice_count
    }

    /// 按配置的颗数摇一次。
    pub fn roll(&mut self) -> Vec<Face> {
        roll_with(&mut self.rng, self.dice_count)
    }

    pub fn roll_count(&mut self, count: usize) -> Vec<Face> {
        roll_with(&mut self.rng, count)
    }

    /// 摇出标准的六颗骰子，与配置的颗数无关。
    pub fn roll_six(&mut self) -> Roll {
        let mut dice = [1; DICE_PER_ROLL];
        for die in dice.iter_mut() {
            *die = face_from_unit(self.rng.gen::<f64>());
        }
        Roll(dice).sorted()
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}
