use flappy_game::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);
    assert_eq!(BestKind::Score, BestKind::Score);
    assert_ne!(BestKind::Score, BestKind::Items);
    assert_eq!(GameEvent::ItemCollected, GameEvent::ItemCollected);
    assert_ne!(
        GameEvent::NewBest(BestKind::Score, 5),
        GameEvent::NewBest(BestKind::Items, 5)
    );

    // Clone must produce an equal value
    let ev = GameEvent::NewBest(BestKind::Items, 3);
    assert_eq!(ev.clone(), GameEvent::NewBest(BestKind::Items, 3));
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        bird: Bird {
            x: 16.0,
            y: 13.0,
            vy: 0.0,
            rotation: 0.0,
            hits_walls: true,
            flapping: true,
        },
        walls: Vec::new(),
        items: Vec::new(),
        score: 0,
        item_score: 0,
        best_score: 0,
        best_item_score: 0,
        status: GameStatus::Running,
        frame: 0,
        ground_scroll: 0.0,
        cloud_scroll: 0.0,
        width: 80,
        height: 24,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.bird.y = 99.0;
    cloned.score = 999;
    cloned.walls.push(WallPair {
        x: 40.0,
        lower_y: 4.0,
        scored: false,
    });
    cloned.items.push(Item { x: 30.0, y: 10.0 });

    assert_eq!(original.bird.y, 13.0);
    assert_eq!(original.score, 0);
    assert!(original.walls.is_empty());
    assert!(original.items.is_empty());
}
