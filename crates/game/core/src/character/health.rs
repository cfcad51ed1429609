use super::Character;
use crate::config::GameConfig;

/// Integer resource meter (health, mana) tracked per character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }
}

/// Visibility timer for the floating health bar.
///
/// There is at most one outstanding deadline; triggering again restarts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HealthBar {
    visible: bool,
    hide_at: Option<u64>,
}

impl HealthBar {
    pub fn trigger(&mut self, now_ms: u64) {
        self.visible = true;
        self.hide_at = Some(now_ms + GameConfig::HEALTH_BAR_TIMEOUT_MS);
    }

    pub fn clear(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    /// Hides the bar once its deadline has passed.
    pub fn update(&mut self, now_ms: u64) {
        if self.hide_at.is_some_and(|deadline| now_ms >= deadline) {
            self.clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_at(&self) -> Option<u64> {
        self.hide_at
    }
}

impl Character {
    pub fn hit_points(&self) -> ResourceMeter {
        self.hit_points
    }

    pub fn mana(&self) -> ResourceMeter {
        self.mana
    }

    pub fn set_hit_points(&mut self, hit_points: u32) {
        self.hit_points.current = hit_points;
        self.hooks.fire_hit_points(hit_points);
    }

    pub fn set_max_hit_points(&mut self, maximum: u32) {
        self.hit_points.maximum = maximum;
    }

    pub fn set_mana(&mut self, mana: u32) {
        self.mana.current = mana;
    }

    pub fn set_max_mana(&mut self, maximum: u32) {
        self.mana.maximum = maximum;
    }

    pub fn trigger_health_bar(&mut self, now_ms: u64) {
        self.health_bar.trigger(now_ms);
    }

    pub fn clear_health_bar(&mut self) {
        self.health_bar.clear();
    }

    pub fn update_health_bar(&mut self, now_ms: u64) {
        self.health_bar.update(now_ms);
    }

    pub fn health_bar_visible(&self) -> bool {
        self.health_bar.is_visible()
    }
}
