//! 博饼核心逻辑（摇骰、名次判定与比较）。

pub mod config;
pub mod dice;
pub mod rank;
pub mod rules;

pub use config::{RollerConfig, MAX_DICE_COUNT};
pub use dice::{
    is_valid_face, roll_dice, roll_with, DiceError, DiceRoller, Face, FaceCounts, Roll,
    DICE_PER_ROLL,
};
pub use rank::{rank_weight, Rank, RankInfo, RankLabels, RANKS, RANK_COUNT};
pub use rules::{
    compare_rolls, judge_rank, judge_rank_strict, winners, RankClassifier, RankRule, RollOutcome,
    RANK_RULES,
};
