pub mod game;

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use game::{
    compare_rolls, judge_rank, judge_rank_strict, rank_weight, roll_dice, winners, DiceError,
    DiceRoller, Face, FaceCounts, Rank, RankClassifier, RankInfo, RankLabels, Roll, RollOutcome,
    RollerConfig, DICE_PER_ROLL, MAX_DICE_COUNT, RANKS,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
}

fn to_js_error(error: DiceError) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&error.to_string()));
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// 持有一个按配置初始化的摇骰器，供前端连续摇骰使用。
#[wasm_bindgen]
pub struct BobingEngine {
    config: RollerConfig,
    roller: DiceRoller,
}

#[wasm_bindgen]
impl BobingEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<BobingEngine, JsValue> {
        let config = match config_json {
            Some(json) => RollerConfig::from_json(&json).map_err(to_js_error)?,
            None => RollerConfig::default(),
        };
        let roller = DiceRoller::from_config(&config);
        let message = format!(
            "博饼引擎已就绪：{} 颗骰子，{}",
            config.dice_count,
            if config.strict { "严格校验" } else { "宽松判定" }
        );
        web_sys::console::log_1(&message.into());
        Ok(BobingEngine { config, roller })
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config).map_err(serde_to_js_error)
    }

    /// 按配置颗数摇一次，只返回点数。
    pub fn roll(&mut self) -> Vec<u8> {
        self.roller.roll()
    }

    /// 摇六颗并判定，返回 `RollOutcome` 的 JSON。
    pub fn roll_json(&mut self) -> Result<String, JsValue> {
        let outcome = RollOutcome::from_roll(&self.roller.roll_six());
        serde_json::to_string(&outcome).map_err(serde_to_js_error)
    }

    /// 判定前端传入的骰子，`strict` 配置下先校验。
    pub fn judge(&self, dice: Vec<u8>) -> Result<JsValue, JsValue> {
        let outcome = if self.config.strict {
            RollOutcome::judge_strict(dice).map_err(to_js_error)?
        } else {
            RollOutcome::judge(dice)
        };
        to_value(&outcome).map_err(JsValue::from)
    }

    /// 等待 `delay_ms` 毫秒（摇骰动画）后再摇，Promise 解析为结果 JSON。
    pub fn roll_async(&mut self, delay_ms: Option<u32>) -> Promise {
        let roll = self.roller.roll_six();
        let delay = delay_ms.unwrap_or(0);

        future_to_promise(async move {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            let outcome = RollOutcome::from_roll(&roll);
            let json = serde_json::to_string(&outcome).map_err(serde_to_js_error)?;
            Ok(JsValue::from_str(&json))
        })
    }
}

/// 摇 `times` 颗骰子（默认 6），结果升序；最多 `MAX_DICE_COUNT` 颗。
#[wasm_bindgen(js_name = "rollDice")]
pub fn roll_dice_js(times: Option<u32>) -> Vec<u8> {
    let times = times.map_or(DICE_PER_ROLL, |times| times as usize);
    roll_dice(times.min(MAX_DICE_COUNT))
}

/// 返回名次标签，不校验输入。
#[wasm_bindgen(js_name = "judgeRank")]
pub fn judge_rank_js(dice: Vec<u8>) -> String {
    judge_rank(&dice).label().to_string()
}

/// 校验后判定，失败时抛出结构化的 `DiceError`。
#[wasm_bindgen(js_name = "judgeRankStrict")]
pub fn judge_rank_strict_js(dice: Vec<u8>) -> Result<JsValue, JsValue> {
    let outcome = RollOutcome::judge_strict(dice).map_err(to_js_error)?;
    to_value(&outcome).map_err(JsValue::from)
}

/// 名次权重，未知标签返回 -1。
#[wasm_bindgen(js_name = "rankWeight")]
pub fn rank_weight_js(label: &str) -> i32 {
    rank_weight(label).map_or(-1, i32::from)
}

/// 比较两个名次标签：前者更大返回 1，相同 0，更小 -1。
#[wasm_bindgen(js_name = "compareRanks")]
pub fn compare_ranks_js(a: &str, b: &str) -> Result<i32, JsValue> {
    let a: Rank = a.parse().map_err(to_js_error)?;
    let b: Rank = b.parse().map_err(to_js_error)?;
    Ok(a.cmp(&b) as i32)
}

/// 完整名次表，供"知识"页面展示。
#[wasm_bindgen(js_name = "rankTable")]
pub fn rank_table() -> Result<JsValue, JsValue> {
    to_value(&RANKS).map_err(JsValue::from)
}

/// `{ KEY: 标签 }` 形式的名次常量，对应旧版前端的 `RANKS`，键按名次顺序排列。
#[wasm_bindgen(js_name = "rankLabels")]
pub fn rank_labels() -> Result<JsValue, JsValue> {
    RankLabels
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// 从多名玩家的结果中选出名次最大者（可并列）。
#[wasm_bindgen(js_name = "pickWinners")]
pub fn pick_winners(outcomes: JsValue) -> Result<Vec<u32>, JsValue> {
    let outcomes: Vec<RollOutcome> = from_value(outcomes).map_err(JsValue::from)?;
    Ok(winners(&outcomes)
        .into_iter()
        .map(|index| index as u32)
        .collect())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
