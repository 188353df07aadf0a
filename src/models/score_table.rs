//! 计分表数据模型
//!
//! 对应 Wingspan（展翅翱翔）荷兰语计分卡上的八行，每一列是一位玩家

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// 计分表
///
/// 八行全部必填。数值行使用 `serde_json::Number`，保证服务返回的
/// 整数/小数原样写回结果文件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Multi-player 行（玩家名）
    pub multi_player: Vec<String>,
    /// Vogels（鸟）
    pub vogels: Vec<Number>,
    /// Bonuskaarten（奖励卡）
    pub bonuskaarten: Vec<Number>,
    /// "Einde ronde"-Doelen（回合目标）
    pub einde_ronde_doelen: Vec<Number>,
    /// Eieren（蛋）
    pub eieren: Vec<Number>,
    /// Voedsel op kaarten（卡上食物）
    pub voedsel_op_kaarten: Vec<Number>,
    /// Weggestopte kaarten（塞卡）
    pub weggestopte_kaarten: Vec<Number>,
    /// Totaal（总分）
    pub totaal: Vec<Number>,
}

impl ScoreTable {
    /// 玩家数量（以 Multi-player 行为准）
    pub fn player_count(&self) -> usize {
        self.multi_player.len()
    }

    /// 各数值行，按计分卡上的顺序
    pub fn numeric_rows(&self) -> [(&'static str, &[Number]); 7] {
        [
            ("vogels", self.vogels.as_slice()),
            ("bonuskaarten", self.bonuskaarten.as_slice()),
            ("einde_ronde_doelen", self.einde_ronde_doelen.as_slice()),
            ("eieren", self.eieren.as_slice()),
            ("voedsel_op_kaarten", self.voedsel_op_kaarten.as_slice()),
            ("weggestopte_kaarten", self.weggestopte_kaarten.as_slice()),
            ("totaal", self.totaal.as_slice()),
        ]
    }

    /// 列数与玩家数不一致的行
    ///
    /// 只用于告警，不做强制校验
    pub fn misaligned_rows(&self) -> Vec<&'static str> {
        let players = self.player_count();
        self.numeric_rows()
            .into_iter()
            .filter(|(_, row)| row.len() != players)
            .map(|(name, _)| name)
            .collect()
    }
}
