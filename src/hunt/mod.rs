//! "Catch the fish" hunt mini-game.
//!
//! `HuntEngine` owns the round counters, every fish and every timer. It is
//! plain Rust: the browser driver (`view`) feeds it the page clock through
//! `advance`, forwards clicks to `catch`, and replays the emitted
//! [`HuntEvent`]s onto the DOM. Each handler re-checks the round and fish state
//! before acting, so timers firing in any order can never double count.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::HuntConfig;

pub mod entity;
pub mod timers;
pub(crate) mod view;

pub use entity::{Entity, EntityId, EntityState, FieldSize, Origin, StepOutcome, Vec2};
use timers::{TimerAction, TimerId, TimerRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `max_catches` reached before the clock ran out.
    Win,
    TimeUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Ended(Outcome),
}

/// End-of-round grade, by fish caught.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    MasterHunter,
    GoodHunter,
    LearningHunter,
    PatientObserver,
}

impl Rating {
    pub fn for_catches(caught: u32) -> Self {
        match caught {
            5.. => Rating::MasterHunter,
            3..=4 => Rating::GoodHunter,
            1..=2 => Rating::LearningHunter,
            0 => Rating::PatientObserver,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::MasterHunter => "🏆 Master Hunter! (Like a real crocodile!)",
            Rating::GoodHunter => "🎯 Good Hunter! (Better than average)",
            Rating::LearningHunter => "🔰 Learning Hunter (Keep practicing!)",
            Rating::PatientObserver => "🐌 Patient Observer (Crocodiles wait too!)",
        }
    }
}

/// Counters for one play-through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub time_remaining: u32,
    pub caught: u32,
    pub missed: u32,
    pub max_catches: u32,
    /// Fish spawned this round.
    pub spawned: u32,
}

impl Round {
    fn new(cfg: &HuntConfig) -> Self {
        Self {
            time_remaining: cfg.round_seconds,
            caught: 0,
            missed: 0,
            max_catches: cfg.max_catches,
            spawned: 0,
        }
    }

    pub fn caught_text(&self) -> String {
        format!("Fish Caught: {}/{}", self.caught, self.max_catches)
    }

    pub fn missed_text(&self) -> String {
        format!("Fish Missed: {}", self.missed)
    }

    pub fn timer_text(&self) -> String {
        format!("Time: {}s", self.time_remaining)
    }
}

pub const IDLE_INSTRUCTION: &str = "Click 'Start Hunt' to begin your crocodile hunting challenge!";
pub const ACTIVE_INSTRUCTION: &str = "🐊 Hunt in progress! Click the moving fish!";
pub const ENDED_INSTRUCTION: &str = "🎯 Hunt Complete! Check your results below.";

/// Observable changes, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum HuntEvent {
    RoundStarted,
    Spawned { id: EntityId, origin: Origin, position: Vec2 },
    Caught { id: EntityId },
    Escaped { id: EntityId },
    /// Sprite should leave the field (after catch feedback, escape, or round end).
    Despawned { id: EntityId },
    Countdown { remaining: u32 },
    RoundEnded { outcome: Outcome, rating: Rating, caught: u32, missed: u32 },
    Reset,
}

struct Slot {
    entity: Entity,
    motion: Option<TimerId>,
}

pub struct HuntEngine {
    cfg: HuntConfig,
    rng: ChaCha8Rng,
    phase: Phase,
    round: Round,
    field: FieldSize,
    fish: BTreeMap<EntityId, Slot>,
    timers: TimerRegistry,
    next_entity: u32,
    events: Vec<HuntEvent>,
}

impl HuntEngine {
    /// Engine seeded from the platform entropy source.
    pub fn new(cfg: HuntConfig) -> Self {
        Self::with_rng(cfg, ChaCha8Rng::from_entropy())
    }

    /// Deterministic engine, for tests and replays.
    pub fn with_seed(cfg: HuntConfig, seed: u64) -> Self {
        Self::with_rng(cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(cfg: HuntConfig, rng: ChaCha8Rng) -> Self {
        let round = Round::new(&cfg);
        Self {
            cfg,
            rng,
            phase: Phase::Idle,
            round,
            field: FieldSize::default(),
            fish: BTreeMap::new(),
            timers: TimerRegistry::new(),
            next_entity: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn set_field(&mut self, field: FieldSize) {
        self.field = field;
    }

    /// Fish currently on the field, including caught ones awaiting removal.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.fish.values().map(|s| &s.entity)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.fish.get(&id).map(|s| &s.entity)
    }

    /// Live timers (countdown, spawner, motion loops, pending removals).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, HuntEvent> {
        self.events.drain(..)
    }

    /// Begin a round. Ignored while a round is already running.
    pub fn start(&mut self, now: f64) {
        if self.phase == Phase::Active {
            log::debug!("start ignored: hunt already active");
            return;
        }
        self.clear_field();
        self.round = Round::new(&self.cfg);
        self.phase = Phase::Active;
        self.events.push(HuntEvent::RoundStarted);

        self.timers
            .schedule_interval(self.cfg.countdown_period_ms, TimerAction::Countdown, now);
        self.timers
            .schedule_interval(self.cfg.spawn_period_ms, TimerAction::Spawn, now);
        self.spawn(now);
        log::info!("hunt started: {}s, {} fish to win", self.round.time_remaining, self.round.max_catches);
    }

    /// Back to the pre-round state from any phase. Idempotent.
    pub fn reset(&mut self) {
        self.clear_field();
        self.round = Round::new(&self.cfg);
        self.phase = Phase::Idle;
        self.events.push(HuntEvent::Reset);
        log::info!("hunt reset");
    }

    /// Player clicked fish `id`. Returns whether the catch counted.
    pub fn catch(&mut self, id: EntityId, now: f64) -> bool {
        if self.phase != Phase::Active || self.round.caught >= self.round.max_catches {
            return false;
        }
        let Some(slot) = self.fish.get_mut(&id) else {
            return false;
        };
        if !slot.entity.is_active() {
            return false;
        }
        slot.entity.state = EntityState::Caught;
        if let Some(motion) = slot.motion.take() {
            self.timers.cancel(motion);
        }
        self.round.caught += 1;
        self.events.push(HuntEvent::Caught { id });
        self.timers
            .schedule_timeout(self.cfg.catch_feedback_ms, TimerAction::RemoveCaught(id), now);
        log::info!("fish caught! total: {}/{}", self.round.caught, self.round.max_catches);

        if self.round.caught >= self.round.max_catches {
            // Let the catch animation play before the results appear.
            self.timers
                .schedule_timeout(self.cfg.catch_feedback_ms, TimerAction::EndRound, now);
        }
        true
    }

    /// Fire every timer due at or before `now`, earliest first. Each action
    /// runs at its own due time, so one late call plays out the same as many
    /// small ones.
    pub fn advance(&mut self, now: f64) {
        while let Some((timer, action, due)) = self.timers.pop_due(now) {
            match action {
                TimerAction::Countdown => self.on_countdown(),
                TimerAction::Spawn => self.spawn(due),
                TimerAction::Motion(id) => self.on_motion(timer, id),
                TimerAction::RemoveCaught(id) => self.remove_caught(id),
                TimerAction::EndRound => self.end(),
            }
        }
    }

    fn on_countdown(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.round.time_remaining = self.round.time_remaining.saturating_sub(1);
        self.events.push(HuntEvent::Countdown { remaining: self.round.time_remaining });
        if self.round.time_remaining == 0 || self.round.caught >= self.round.max_catches {
            self.end();
        }
    }

    fn spawn(&mut self, now: f64) {
        if self.phase != Phase::Active {
            return;
        }
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.round.spawned += 1;
        let entity = entity::spawn(id, &mut self.rng, self.field, &self.cfg);
        self.events.push(HuntEvent::Spawned { id, origin: entity.origin, position: entity.position });
        let motion = self
            .timers
            .schedule_interval(self.cfg.motion_period_ms, TimerAction::Motion(id), now);
        self.fish.insert(id, Slot { entity, motion: Some(motion) });
    }

    fn on_motion(&mut self, timer: TimerId, id: EntityId) {
        let live = self.phase == Phase::Active;
        let slot = match self.fish.get_mut(&id) {
            Some(slot) if live && slot.entity.is_active() => slot,
            _ => {
                // Stale loop for a resolved fish; stop it.
                self.timers.cancel(timer);
                return;
            }
        };
        if entity::step(&mut slot.entity, self.field, &self.cfg) == StepOutcome::Escaped {
            slot.entity.state = EntityState::Escaped;
            self.timers.cancel(timer);
            self.fish.remove(&id);
            self.round.missed += 1;
            self.events.push(HuntEvent::Escaped { id });
            self.events.push(HuntEvent::Despawned { id });
            log::info!("fish escaped! missed: {}", self.round.missed);
        }
    }

    fn remove_caught(&mut self, id: EntityId) {
        let caught = matches!(self.fish.get(&id), Some(s) if s.entity.state == EntityState::Caught);
        if caught {
            self.fish.remove(&id);
            self.events.push(HuntEvent::Despawned { id });
        }
    }

    fn end(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        let outcome = if self.round.caught >= self.round.max_catches {
            Outcome::Win
        } else {
            Outcome::TimeUp
        };
        self.clear_field();
        self.phase = Phase::Ended(outcome);
        let rating = Rating::for_catches(self.round.caught);
        self.events.push(HuntEvent::RoundEnded {
            outcome,
            rating,
            caught: self.round.caught,
            missed: self.round.missed,
        });
        log::info!(
            "hunt over ({outcome:?}): caught {}, missed {}, {}",
            self.round.caught,
            self.round.missed,
            rating.label()
        );
    }

    /// Cancel every timer and drop every fish, whatever its state.
    fn clear_field(&mut self) {
        self.timers.cancel_all();
        for id in std::mem::take(&mut self.fish).into_keys() {
            self.events.push(HuntEvent::Despawned { id });
        }
    }
}
