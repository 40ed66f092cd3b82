use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::CombatError,
    game::{
        card::{Card, Defender},
        BOARD_SIZE,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStatus {
    Ready,
    /// 이번 턴에 이미 공격했거나 막 소환됨
    Exhausted,
    Frozen,
}

impl AttackStatus {
    pub fn can_attack(self) -> bool {
        matches!(self, AttackStatus::Ready)
    }

    /// Frozen 은 공격만 막습니다. 반격은 상태와 무관합니다.
    pub fn can_counter_attack(self) -> bool {
        true
    }
}

/// 보드 위에 올라간 하수인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDefender {
    #[serde(flatten)]
    card: Card,
    status: AttackStatus,
}

impl ActiveDefender {
    pub fn new(card: Card, status: AttackStatus) -> Self {
        Self { card, status }
    }

    pub fn id(&self) -> Uuid {
        self.card.id()
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut Card {
        &mut self.card
    }

    pub fn status(&self) -> AttackStatus {
        self.status
    }

    pub fn set_status(&mut self, status: AttackStatus) {
        self.status = status;
    }

    /// target 에 피해를 주고, target 이 반격 가능하면 반격 피해를 받습니다.
    /// 공격 후에는 항상 Exhausted.
    pub fn attack<D: Defender + ?Sized>(&mut self, target: &mut D) -> Result<(), CombatError> {
        if !self.status.can_attack() {
            return Err(CombatError::CannotAttack(self.status));
        }

        target.reduce_health(self.damage());
        if target.can_counter_attack() {
            self.reduce_health(target.damage());
        }
        self.status = AttackStatus::Exhausted;

        Ok(())
    }
}

impl Defender for ActiveDefender {
    fn damage(&self) -> u32 {
        self.card.damage()
    }

    fn health(&self) -> u32 {
        self.card.health()
    }

    fn reduce_health(&mut self, amount: u32) {
        self.card.reduce_health(amount);
    }

    fn can_counter_attack(&self) -> bool {
        self.status.can_counter_attack()
    }
}

/// 한 플레이어의 보드. 배치 순서를 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    defenders: Vec<ActiveDefender>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.defenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defenders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.defenders.len() >= BOARD_SIZE
    }

    pub fn defenders(&self) -> &[ActiveDefender] {
        &self.defenders
    }

    /// 새 하수인은 Exhausted 로 들어옵니다. 보드가 가득 차면 None.
    pub fn place_card(&mut self, card: Card) -> Option<&ActiveDefender> {
        if self.is_full() {
            return None;
        }
        self.defenders
            .push(ActiveDefender::new(card, AttackStatus::Exhausted));
        self.defenders.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&ActiveDefender> {
        self.defenders.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ActiveDefender> {
        self.defenders.iter_mut().find(|d| d.id() == id)
    }

    pub fn remove_dead(&mut self) -> Vec<ActiveDefender> {
        let (dead, alive): (Vec<_>, Vec<_>) =
            self.defenders.drain(..).partition(|d| d.is_dead());
        self.defenders = alive;
        dead
    }

    /// 턴 시작 시 Frozen 을 포함한 모든 하수인을 Ready 로
    pub fn ready_all(&mut self) {
        for defender in &mut self.defenders {
            defender.status = AttackStatus::Ready;
        }
    }
}
