//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG; anything
//! the host loop must do (persist a best, play the pickup chime) comes
//! back as `GameEvent`s.

use rand::Rng;

use crate::entities::{
    BestKind, Bird, GameEvent, GameStatus, GameState, Item, WallPair,
};

// ── World constants (rows/columns, frames at ~30 FPS) ────────────────────────

/// Height of the ground strip at the bottom of the screen.
pub const GROUND_ROWS: f64 = 2.0;
/// Bird reference height; the wall gap and the vertical jitter are
/// both three times this.
pub const BIRD_ROWS: f64 = 2.0;
/// Width of the bird's collision box.
pub const BIRD_COLS: f64 = 3.0;
/// Height of one wall section as used by the placement formula.
pub const WALL_ROWS: f64 = 6.0;
/// Width of a wall pair.
pub const WALL_COLS: f64 = 3.0;
/// Width of the invisible score-trigger region just past a wall pair.
pub const TRIGGER_COLS: f64 = 3.0;
pub const ITEM_ROWS: f64 = 1.0;
pub const ITEM_COLS: f64 = 1.0;

/// Downward acceleration in rows per frame².
pub const GRAVITY: f64 = -0.09;
/// Vertical velocity set by a flap, replacing any current fall speed.
pub const FLAP_VELOCITY: f64 = 0.85;
/// Tumble step per frame while the bird falls out of a finished run.
pub const TUMBLE_STEP: f64 = 0.35;

/// One wall pair every 2 s.
pub const WALL_SPAWN_PERIOD: u64 = 60;
/// Items share the 2 s period but run 1 s out of phase with the walls.
pub const ITEM_SPAWN_PERIOD: u64 = 60;
pub const ITEM_SPAWN_PHASE: u64 = 30;
/// Frames for a spawned entity to cross the screen plus its own width,
/// so the steady-state population is travel / period = 2 wall pairs.
pub const TRAVEL_FRAMES: f64 = 120.0;

/// The cloud layer scrolls at a quarter of the ground speed.
pub const CLOUD_SPEED_RATIO: f64 = 0.25;

// ── Wall placement geometry ──────────────────────────────────────────────────

/// Vertical placement bounds shared by every wall spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallGeometry {
    /// Gap the bird flies through.
    pub gap: f64,
    /// Range of the uniform vertical jitter.
    pub jitter: f64,
    /// Center of the visible band between ground and screen top.
    pub center: f64,
    /// Bottom edge of the lowest legal lower-wall placement.
    pub lowest_lower_y: f64,
}

/// Placement bounds for a field of height `field_h` with a ground strip
/// of height `ground_h`, a bird of height `bird_h` and wall sections of
/// height `wall_h`.
///
/// The jitter draw is half-open (`[0, jitter)`), and for any draw the
/// gap band `[lower_y + wall_h, lower_y + wall_h + gap]` stays inside
/// `[ground_h, field_h]` by construction — no clamping happens anywhere
/// downstream.
pub fn wall_geometry(field_h: f64, ground_h: f64, bird_h: f64, wall_h: f64) -> WallGeometry {
    let gap = bird_h * 3.0;
    let jitter = bird_h * 3.0;
    let center = ground_h + (field_h - ground_h) / 2.0;
    let lowest_lower_y = center - gap / 2.0 - wall_h / 2.0 - jitter / 2.0;
    WallGeometry {
        gap,
        jitter,
        center,
        lowest_lower_y,
    }
}

/// The vertical span `(bottom, top)` of a wall pair's gap.
pub fn gap_band(wall: &WallPair) -> (f64, f64) {
    let bottom = wall.lower_y + WALL_ROWS;
    (bottom, bottom + BIRD_ROWS * 3.0)
}

/// Columns a wall or item travels per frame.
pub fn scroll_speed(width: u16) -> f64 {
    (width as f64 + WALL_COLS) / TRAVEL_FRAMES
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the terminal dimensions and the
/// stored bests.
pub fn init_state(width: u16, height: u16, best_score: u32, best_item_score: u32) -> GameState {
    GameState {
        bird: spawn_bird(width, height),
        walls: Vec::new(),
        items: Vec::new(),
        score: 0,
        item_score: 0,
        best_score,
        best_item_score,
        status: GameStatus::Running,
        frame: 0,
        ground_scroll: 0.0,
        cloud_scroll: 0.0,
        width,
        height,
    }
}

fn spawn_bird(width: u16, height: u16) -> Bird {
    let geo = wall_geometry(height as f64, GROUND_ROWS, BIRD_ROWS, WALL_ROWS);
    Bird {
        x: (width as f64 * 0.2).floor(),
        y: geo.center,
        vy: 0.0,
        rotation: 0.0,
        hits_walls: true,
        flapping: true,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// A single tap: discard the current fall speed and apply the fixed
/// upward impulse.  Ignored once the run has ended.
pub fn flap(state: &GameState) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }
    GameState {
        bird: Bird {
            vy: FLAP_VELOCITY,
            ..state.bird.clone()
        },
        ..state.clone()
    }
}

/// Begin a fresh run after a game over: per-run counters reset, walls
/// and items cleared, the bird back at its start coordinate with its
/// full collision response.  The bests survive.
pub fn restart(state: &GameState) -> GameState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    GameState {
        bird: spawn_bird(state.width, state.height),
        walls: Vec::new(),
        items: Vec::new(),
        score: 0,
        item_score: 0,
        status: GameStatus::Running,
        frame: 0,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// What the bird touched this frame, in dispatch priority order:
/// score triggers before items before terminal surfaces.
enum Contact {
    Trigger(usize),
    Item(usize),
    Solid,
}

/// Advance the simulation by one frame.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a
/// seeded RNG).  Returns the new state plus the side effects the host
/// loop must carry out.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> (GameState, Vec<GameEvent>) {
    let frame = state.frame + 1;
    let mut events: Vec<GameEvent> = Vec::new();
    let running = state.status == GameStatus::Running;
    let field_h = state.height as f64;
    let speed = scroll_speed(state.width);

    // ── 1. Bird physics ──────────────────────────────────────────────────────
    let mut bird = state.bird.clone();
    match state.status {
        GameStatus::Running => {
            bird.vy += GRAVITY;
            bird.y += bird.vy;
            // The top edge is a hard bound, not a terminal surface.
            if bird.y + BIRD_ROWS > field_h {
                bird.y = field_h - BIRD_ROWS;
                bird.vy = 0.0;
            }
        }
        GameStatus::GameOver => {
            // The bird keeps falling and tumbling until it reaches the
            // ground, then comes to rest with its animation halted.
            if bird.flapping {
                bird.vy += GRAVITY;
                bird.y += bird.vy;
                bird.rotation -= TUMBLE_STEP;
                if bird.y <= GROUND_ROWS {
                    bird.y = GROUND_ROWS;
                    bird.vy = 0.0;
                    bird.flapping = false;
                }
            }
        }
    }

    // ── 2. Scenery scroll (frozen after a terminal collision) ────────────────
    let (ground_scroll, cloud_scroll) = if running {
        (
            state.ground_scroll + speed,
            state.cloud_scroll + speed * CLOUD_SPEED_RATIO,
        )
    } else {
        (state.ground_scroll, state.cloud_scroll)
    };

    // ── 3. Move walls and items, dropping what has fully scrolled off ────────
    let mut walls: Vec<WallPair> = if running {
        state
            .walls
            .iter()
            .map(|w| WallPair {
                x: w.x - speed,
                ..w.clone()
            })
            .filter(|w| w.x + WALL_COLS + TRIGGER_COLS > 0.0)
            .collect()
    } else {
        state.walls.clone()
    };

    let mut items: Vec<Item> = if running {
        state
            .items
            .iter()
            .map(|i| Item {
                x: i.x - speed,
                ..i.clone()
            })
            .filter(|i| i.x + ITEM_COLS > 0.0)
            .collect()
    } else {
        state.items.clone()
    };

    // ── 4. Spawn on the fixed periods ────────────────────────────────────────
    if running {
        let geo = wall_geometry(field_h, GROUND_ROWS, BIRD_ROWS, WALL_ROWS);
        if frame % WALL_SPAWN_PERIOD == 0 {
            let lower_y = geo.lowest_lower_y + rng.gen_range(0.0..geo.jitter);
            walls.push(WallPair {
                x: state.width as f64,
                lower_y,
                scored: false,
            });
        }
        if frame % ITEM_SPAWN_PERIOD == ITEM_SPAWN_PHASE {
            // Drawn from the same jitter range but offset to sit below
            // the gap band; deliberately decorrelated from any single
            // wall's placement.
            let y = geo.center - ITEM_ROWS - geo.jitter / 2.0 + rng.gen_range(0.0..geo.jitter);
            items.push(Item {
                x: state.width as f64,
                y,
            });
        }
    }

    // ── 5. Classify contacts by entity kind ──────────────────────────────────
    // Push order fixes the dispatch priority: triggers, then items,
    // then terminal surfaces.
    let bird_left = bird.x;
    let bird_right = bird.x + BIRD_COLS;
    let bird_bottom = bird.y;
    let bird_top = bird.y + BIRD_ROWS;
    let mut contacts: Vec<Contact> = Vec::new();

    for (i, wall) in walls.iter().enumerate() {
        let trigger_left = wall.x + WALL_COLS;
        if !wall.scored
            && spans_overlap(bird_left, bird_right, trigger_left, trigger_left + TRIGGER_COLS)
        {
            contacts.push(Contact::Trigger(i));
        }
    }
    for (i, item) in items.iter().enumerate() {
        if spans_overlap(bird_left, bird_right, item.x, item.x + ITEM_COLS)
            && spans_overlap(bird_bottom, bird_top, item.y, item.y + ITEM_ROWS)
        {
            contacts.push(Contact::Item(i));
        }
    }
    if bird.hits_walls {
        for wall in &walls {
            let (gap_bottom, gap_top) = gap_band(wall);
            if spans_overlap(bird_left, bird_right, wall.x, wall.x + WALL_COLS)
                && (bird_bottom < gap_bottom || bird_top > gap_top)
            {
                contacts.push(Contact::Solid);
            }
        }
    }
    if bird_bottom <= GROUND_ROWS {
        contacts.push(Contact::Solid);
    }

    // ── 6. Dispatch ──────────────────────────────────────────────────────────
    let mut status = state.status.clone();
    let mut score = state.score;
    let mut item_score = state.item_score;
    let mut best_score = state.best_score;
    let mut best_item_score = state.best_item_score;
    let mut collected: Vec<usize> = Vec::new();

    for contact in contacts {
        // Contacts arriving after the terminal one in the same frame
        // (and any contact once the run is over) are ignored.
        if status != GameStatus::Running {
            break;
        }
        match contact {
            Contact::Trigger(i) => {
                walls[i].scored = true;
                score += 1;
                if score > best_score {
                    best_score = score;
                    events.push(GameEvent::NewBest(BestKind::Score, best_score));
                }
            }
            Contact::Item(i) => {
                collected.push(i);
                item_score += 1;
                if item_score > best_item_score {
                    best_item_score = item_score;
                    events.push(GameEvent::NewBest(BestKind::Items, best_item_score));
                }
                events.push(GameEvent::ItemCollected);
            }
            Contact::Solid => {
                status = GameStatus::GameOver;
                bird.hits_walls = false;
            }
        }
    }

    // Collected items leave the world in the same frame.
    let items: Vec<Item> = items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !collected.contains(i))
        .map(|(_, item)| item)
        .collect();

    // ── 7. Assemble the new state ────────────────────────────────────────────
    let next = GameState {
        bird,
        walls,
        items,
        score,
        item_score,
        best_score,
        best_item_score,
        status,
        frame,
        ground_scroll,
        cloud_scroll,
        width: state.width,
        height: state.height,
    };
    (next, events)
}

fn spans_overlap(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> bool {
    a_lo < b_hi && b_lo < a_hi
}
