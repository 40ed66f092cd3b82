use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::{Builder, Uuid};

/// 공격을 받을 수 있는 대상. 하수인과 플레이어 모두 해당합니다.
pub trait Defender {
    fn damage(&self) -> u32;
    fn health(&self) -> u32;
    fn reduce_health(&mut self, amount: u32);
    fn can_counter_attack(&self) -> bool;

    fn is_dead(&self) -> bool {
        self.health() == 0
    }
}

/// 하수인 카드. id 는 불변이고 수치는 모두 0 아래로 내려가지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: Uuid,
    mana_cost: u32,
    damage: u32,
    health: u32,
}

impl Card {
    pub fn new(mana_cost: u32, damage: u32, health: u32) -> Self {
        Self::with_id(Uuid::new_v4(), mana_cost, damage, health)
    }

    pub fn with_id(id: Uuid, mana_cost: u32, damage: u32, health: u32) -> Self {
        Self {
            id,
            mana_cost,
            damage,
            health,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mana_cost(&self) -> u32 {
        self.mana_cost
    }

    /// 스탯 효과를 적용합니다. Freeze 처럼 카드 스탯과 무관한 효과는 false.
    pub fn apply(&mut self, effect: CardEffect) -> bool {
        match effect {
            CardEffect::ReduceManaCost(n) => self.mana_cost = self.mana_cost.saturating_sub(n),
            CardEffect::IncreaseManaCost(n) => self.mana_cost = self.mana_cost.saturating_add(n),
            CardEffect::GainDamage(n) => self.damage = self.damage.saturating_add(n),
            CardEffect::ReduceDamage(n) => self.damage = self.damage.saturating_sub(n),
            CardEffect::GainHealth(n) => self.health = self.health.saturating_add(n),
            CardEffect::ReduceHealth(n) => self.reduce_health(n),
            CardEffect::Freeze => return false,
        }
        true
    }
}

impl Defender for Card {
    fn damage(&self) -> u32 {
        self.damage
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn reduce_health(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    fn can_counter_attack(&self) -> bool {
        true
    }
}

/// 카드에 외부에서 가해지는 효과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum CardEffect {
    ReduceManaCost(u32),
    IncreaseManaCost(u32),
    GainDamage(u32),
    ReduceDamage(u32),
    GainHealth(u32),
    ReduceHealth(u32),
    /// 보드 위 하수인에게만 의미가 있습니다.
    Freeze,
}

/// (mana_cost, damage, health)
pub const CARD_POOL: &[(u32, u32, u32)] = &[
    (1, 1, 1),
    (1, 1, 2),
    (2, 2, 2),
    (2, 1, 3),
    (3, 3, 2),
    (3, 2, 4),
    (4, 4, 4),
    (5, 4, 6),
    (6, 6, 5),
    (7, 7, 7),
];

/// 풀에서 하나를 뽑아 새 id 를 붙입니다. id 도 같은 rng 에서 뽑으므로 시드가 같으면 덱이 같습니다.
pub fn random_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    let (mana_cost, damage, health) = CARD_POOL[rng.gen_range(0..CARD_POOL.len())];
    let id = Builder::from_random_bytes(rng.gen()).into_uuid();
    Card::with_id(id, mana_cost, damage, health)
}

pub fn build_deck<R: Rng + ?Sized>(rng: &mut R, size: usize) -> VecDeque<Card> {
    (0..size).map(|_| random_card(rng)).collect()
}
