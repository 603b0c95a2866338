use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{
    dice::{DiceError, Face, FaceCounts, Roll},
    rank::Rank,
};

/// 判定规则：命中 `matches` 即得 `rank`。
#[derive(Clone, Copy)]
pub struct RankRule {
    pub rank: Rank,
    matches: fn(&FaceCounts) -> bool,
}

impl RankRule {
    const fn new(rank: Rank, matches: fn(&FaceCounts) -> bool) -> Self {
        Self { rank, matches }
    }

    pub fn matches(&self, counts: &FaceCounts) -> bool {
        (self.matches)(counts)
    }
}

impl std::fmt::Debug for RankRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankRule").field("rank", &self.rank).finish()
    }
}

/// 按优先级从高到低排列，自上而下第一条命中即返回，都不命中为 [`Rank::NoRank`]。
///
/// 顺序不可调整：进士只看"最多同点数为 4"，四个4 靠状元插金花与状元排在前面才不会落到进士。
pub static RANK_RULES: [RankRule; 12] = [
    RankRule::new(Rank::ZhuangyuanChaJinhua, |c| c.count(4) == 4 && c.count(1) == 2),
    RankRule::new(Rank::SixRed, |c| c.count(4) == 6),
    RankRule::new(Rank::SixBlack, |c| c.count(2) == 6),
    RankRule::new(Rank::FiveKings, |c| c.count(4) == 5),
    RankRule::new(Rank::FiveTwosWithOneFour, |c| c.count(2) == 5 && c.count(4) == 1),
    RankRule::new(Rank::FiveTwos, |c| c.count(2) == 5),
    RankRule::new(Rank::Zhuangyuan, |c| c.count(4) == 4),
    RankRule::new(Rank::Bangyan, FaceCounts::is_straight),
    RankRule::new(Rank::Tanhua, |c| c.count(4) == 3),
    RankRule::new(Rank::Jinshi, |c| c.max_count() == 4),
    RankRule::new(Rank::Juren, |c| c.count(4) == 2),
    RankRule::new(Rank::Xiucai, |c| c.count(4) == 1),
];

#[derive(Debug, Clone, Copy)]
pub struct RankClassifier {
    rules: &'static [RankRule],
}

impl RankClassifier {
    pub fn new() -> Self {
        Self { rules: &RANK_RULES }
    }

    pub fn rules(&self) -> &'static [RankRule] {
        self.rules
    }

    /// 第一条命中的规则，`None` 表示不成名次。
    pub fn matching_rule(&self, counts: &FaceCounts) -> Option<&'static RankRule> {
        self.rules.iter().find(|rule| rule.matches(counts))
    }

    pub fn classify_counts(&self, counts: &FaceCounts) -> Rank {
        self.matching_rule(counts)
            .map(|rule| rule.rank)
            .unwrap_or(Rank::NoRank)
    }

    pub fn classify(&self, roll: &Roll) -> Rank {
        self.classify_counts(&roll.face_counts())
    }
}

impl Default for RankClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// 判定名次，不校验输入：个数不做检查，越界点数忽略。
///
/// 旧版 JS 会把越界点数也计入同点数，`[7,7,7,7,1,1]` 在那里是进士，这里是无。
pub fn judge_rank(dice: &[Face]) -> Rank {
    RankClassifier::new().classify_counts(&FaceCounts::from_faces(dice))
}

/// 先校验必须是六颗 1..=6 的骰子，再判定。
pub fn judge_rank_strict(dice: &[Face]) -> Result<Rank, DiceError> {
    let roll = Roll::new(dice)?;
    Ok(RankClassifier::new().classify(&roll))
}

/// 两次投掷按名次比较，名次越大越靠后（`Greater`）。
pub fn compare_rolls(a: &Roll, b: &Roll) -> Ordering {
    let classifier = RankClassifier::new();
    classifier.classify(a).cmp(&classifier.classify(b))
}

/// 一名玩家一次投掷的结果，交给前端展示。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollOutcome {
    pub dice: Vec<Face>,
    pub rank: Rank,
    pub label: String,
    pub weight: u8,
}

impl RollOutcome {
    pub fn new(dice: Vec<Face>, rank: Rank) -> Self {
        Self {
            dice,
            rank,
            label: rank.label().to_string(),
            weight: rank.weight(),
        }
    }

    pub fn from_roll(roll: &Roll) -> Self {
        Self::new(roll.faces().to_vec(), RankClassifier::new().classify(roll))
    }

    pub fn judge(dice: Vec<Face>) -> Self {
        let rank = judge_rank(&dice);
        Self::new(dice, rank)
    }

    pub fn judge_strict(dice: Vec<Face>) -> Result<Self, DiceError> {
        let rank = judge_rank_strict(&dice)?;
        Ok(Self::new(dice, rank))
    }

    pub fn beats(&self, other: &RollOutcome) -> bool {
        self.rank.outranks(other.rank)
    }
}

/// 名次最大的所有结果下标（并列全部返回），空输入返回空。
pub fn winners(outcomes: &[RollOutcome]) -> Vec<usize> {
    let Some(best) = outcomes.iter().map(|outcome| outcome.rank).max() else {
        return Vec::new();
    };
    outcomes
        .iter()
        .enumerate()
        .filter(|(_, outcome)| outcome.rank == best)
        .map(|(index, _)| index)
        .collect()
}
