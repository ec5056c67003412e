//! All game entity types — pure data, no logic.
//!
//! The world uses float coordinates: columns grow rightward, rows grow
//! upward from the bottom of the screen (row 0 is the bottom edge).
//! The rendering layer converts to terminal cells.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Which persisted best value a counter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BestKind {
    /// Walls passed.
    Score,
    /// Items collected.
    Items,
}

/// Side effects requested by the simulation and carried out by the
/// host loop (persistence writes, the pickup chime).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// An item was collected this frame.
    ItemCollected,
    /// A stored best was beaten; the new value must be persisted.
    NewBest(BestKind, u32),
}

// ── Bird ──────────────────────────────────────────────────────────────────────

/// The player-controlled bird. `x` is the left edge in columns (fixed
/// during a run), `y` the bottom edge in rows.
#[derive(Clone, Debug)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in rows per frame (positive = upward).
    pub vy: f64,
    /// Tumble angle accumulated while falling out of a finished run.
    pub rotation: f64,
    /// Cleared on a terminal collision: from then on the bird only
    /// responds to the ground.
    pub hits_walls: bool,
    /// Wing animation running. Halted once the bird settles after a
    /// terminal collision.
    pub flapping: bool,
}

// ── Walls & items ─────────────────────────────────────────────────────────────

/// A paired upper/lower wall and its one-shot score trigger.
#[derive(Clone, Debug)]
pub struct WallPair {
    /// Left edge in columns.
    pub x: f64,
    /// Bottom edge of the lower wall section, as produced by the
    /// placement formula.
    pub lower_y: f64,
    /// Set once the trigger region past the pair has been crossed.
    pub scored: bool,
}

/// A collectible drifting leftward along with the walls.
#[derive(Clone, Debug)]
pub struct Item {
    pub x: f64,
    pub y: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub bird: Bird,
    pub walls: Vec<WallPair>,
    pub items: Vec<Item>,
    /// Walls passed this run.
    pub score: u32,
    /// Items collected this run.
    pub item_score: u32,
    /// Stored bests, updated live; the host loop persists them when a
    /// `GameEvent::NewBest` is emitted.
    pub best_score: u32,
    pub best_item_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Scenery offsets in columns; the cloud layer trails the ground.
    pub ground_scroll: f64,
    pub cloud_scroll: f64,
    pub width: u16,
    pub height: u16,
}
