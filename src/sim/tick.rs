//! Fixed timestep simulation tick
//!
//! One call advances the round by exactly one frame.

use super::bonus::{Bonus, BonusKind};
use super::brick::BrickEvent;
use super::entity::Movable;
use super::geometry::intersects;
use super::paddle::PaddleInput;
use super::state::{DrawSource, GameEvent, RoundPhase, RoundState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction keys held this frame
    pub paddle: PaddleInput,
    /// Quit requested
    pub quit: bool,
}

/// Advance the round by one fixed timestep.
///
/// Order within the frame: input, movement, ball loss, ball collisions
/// (paddle before bricks, per ball), brick events and scoring, win check,
/// bonuses. Returns the frame's events; `state.phase` holds the outcome.
pub fn tick(state: &mut RoundState, input: &TickInput, draws: &mut impl DrawSource) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase.is_over() {
        return events;
    }

    if input.quit {
        log::info!("Round aborted (score {})", state.score);
        state.phase = RoundPhase::Aborted;
        return events;
    }

    state.frame += 1;
    let dt = state.config.dt();

    // Input and movement
    state.paddle.handle_input(input.paddle);
    state.paddle.advance(dt);
    for ball in &mut state.balls {
        ball.advance(dt);
    }

    // Ball loss
    let screen_height = state.config.screen_height;
    state.balls.retain(|b| !b.is_below(screen_height));
    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        state.score -= state.config.ball_lost_penalty;
        log::debug!("Ball lost, {} lives left", state.lives);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });

        if state.lives == 0 {
            log::info!("Round lost (score {})", state.score);
            state.phase = RoundPhase::Lost;
            return events;
        }

        state.spawn_ball();
        events.push(GameEvent::BallSpawned);
    }

    // Ball collisions
    let paddle_rect = state.paddle.rect();
    let english = state.config.paddle_english;
    for ball in &mut state.balls {
        ball.check_collision_with_paddle(&paddle_rect, english);
        ball.check_collision_with_bricks(&mut state.bricks);
    }

    // Brick events and scoring
    let config = &state.config;
    for (index, brick) in state.bricks.iter_mut().enumerate() {
        match brick.take_event() {
            Some(BrickEvent::Destroyed) => {
                state.score += config.score_brick_destroyed;
                events.push(GameEvent::BrickDestroyed { index });

                if let Some(kind) = BonusKind::from_draw(draws.draw(), &config.bonus_thresholds) {
                    log::debug!("Brick {} dropped {:?}", index, kind);
                    state.bonuses.push(Bonus::below(
                        kind,
                        &brick.rect,
                        config.bonus_size,
                        config.bonus_speed,
                    ));
                    events.push(GameEvent::BonusSpawned { kind, index });
                }
            }
            Some(BrickEvent::Hit) => {
                state.score += config.score_brick_hit;
                events.push(GameEvent::BrickHit { index });
            }
            None => {}
        }
    }

    if state.all_bricks_destroyed() {
        log::info!("Round won (score {}, {} lives left)", state.score, state.lives);
        state.phase = RoundPhase::Won;
        return events;
    }

    // Bonuses
    let paddle_rect = state.paddle.rect();
    let mut collected = Vec::new();
    state.bonuses.retain_mut(|bonus| {
        bonus.advance(dt);
        if bonus.is_off_screen(screen_height) {
            return false;
        }
        if intersects(&bonus.rect(), &paddle_rect) {
            collected.push(bonus.kind);
            return false;
        }
        true
    });
    for kind in collected {
        apply_bonus(state, kind, &mut events);
    }

    events
}

/// Resolve a caught bonus
fn apply_bonus(state: &mut RoundState, kind: BonusKind, events: &mut Vec<GameEvent>) {
    log::debug!("Collected {:?}", kind);
    events.push(GameEvent::BonusCollected { kind });
    match kind {
        BonusKind::ExtraLife => state.lives += 1,
        BonusKind::MultiBall => {
            while state.balls.len() < state.config.multi_ball_count {
                state.spawn_ball_at_top();
                events.push(GameEvent::BallSpawned);
            }
        }
        BonusKind::SmallPlatform => state.paddle.apply_small_platform_malus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::ScriptedDraws;
    use crate::sim::ball::Ball;
    use crate::sim::brick::{Brick, BrickShape};
    use crate::sim::geometry::Rect;
    use glam::Vec2;
    use proptest::prelude::*;

    fn brick_at(x: f32, y: f32, durability: u32) -> Brick {
        Brick::new(Rect::new(x, y, 100.0, 20.0), BrickShape::Rectangular, durability)
    }

    /// A brick far from anything the test ball will touch, keeps the round open
    fn bystander() -> Brick {
        brick_at(1000.0, 10.0, 1)
    }

    fn ball_at(state: &RoundState, pos: Vec2, vel: Vec2) -> Ball {
        let c = &state.config;
        Ball::new(pos, vel, c.ball_radius, Vec2::new(c.screen_width, c.screen_height))
    }

    /// Place the single ball so that one frame of movement lands it under `brick`
    fn aim_at_brick_from_below(state: &mut RoundState, index: usize) {
        let rect = state.bricks[index].rect;
        let dt = state.config.dt();
        let vel = Vec2::new(0.0, -300.0);
        let target = Vec2::new(rect.center().x, rect.bottom() + state.config.ball_radius - 2.0);
        let ball = ball_at(state, target - vel * dt, vel);
        state.balls = vec![ball];
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_single_hit_brick_scores_150() {
        let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 1), bystander()]);
        aim_at_brick_from_below(&mut state, 0);

        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert!(state.bricks[0].is_destroyed());
        assert_eq!(events, vec![GameEvent::BrickDestroyed { index: 0 }]);
        assert_eq!(state.score, 150);
        assert_eq!(state.phase, RoundPhase::Running);
    }

    #[test]
    fn test_durable_brick_scores_hit_then_destroy() {
        let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 2), bystander()]);
        aim_at_brick_from_below(&mut state, 0);

        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert_eq!(events, vec![GameEvent::BrickHit { index: 0 }]);
        assert!(!state.bricks[0].is_destroyed());
        assert!(!state.bricks[0].is_hit());
        assert_eq!(state.score, 10);

        aim_at_brick_from_below(&mut state, 0);
        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert_eq!(events, vec![GameEvent::BrickDestroyed { index: 0 }]);
        assert!(state.bricks[0].is_destroyed());
        assert_eq!(state.score, 160);
    }

    #[test]
    fn test_destroyed_event_fires_once() {
        let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 1), bystander()]);
        aim_at_brick_from_below(&mut state, 0);

        let mut destroyed_events = 0;
        for _ in 0..120 {
            let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());
            destroyed_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickDestroyed { index: 0 }))
                .count();
            assert!(!state.bricks[0].was_just_destroyed());
        }
        assert_eq!(destroyed_events, 1);
        assert!(state.bricks[0].is_destroyed());
    }

    #[test]
    fn test_losing_last_ball_costs_a_life() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        let ball = ball_at(&state, Vec2::new(100.0, 795.0), Vec2::new(0.0, 300.0));
        state.balls = vec![ball];

        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert_eq!(state.lives, 2);
        assert_eq!(state.score, -50);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost { lives_left: 2 }, GameEvent::BallSpawned]
        );
        assert_eq!(state.phase, RoundPhase::Running);
    }

    #[test]
    fn test_losing_one_of_several_balls_is_free() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        let falling = ball_at(&state, Vec2::new(100.0, 795.0), Vec2::new(0.0, 300.0));
        let safe = ball_at(&state, Vec2::new(600.0, 300.0), Vec2::new(0.0, 300.0));
        state.balls = vec![falling, safe];

        tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_last_life_lost() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        state.lives = 1;
        let ball = ball_at(&state, Vec2::new(100.0, 795.0), Vec2::new(0.0, 300.0));
        state.balls = vec![ball];

        tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert_eq!(state.phase, RoundPhase::Lost);
        assert_eq!(state.lives, 0);
        assert!(state.balls.is_empty());

        // Terminal: further ticks change nothing
        let score = state.score;
        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert!(events.is_empty());
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_final_brick_wins_regardless_of_lives() {
        let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 1)]);
        state.lives = 1;
        aim_at_brick_from_below(&mut state, 0);

        tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert_eq!(state.phase, RoundPhase::Won);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_already_cleared_field_wins_immediately() {
        let mut state = RoundState::new(GameConfig::default(), Vec::new());
        tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert_eq!(state.phase, RoundPhase::Won);
    }

    #[test]
    fn test_quit_aborts() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, &mut ScriptedDraws::never());
        assert!(events.is_empty());
        assert_eq!(state.phase, RoundPhase::Aborted);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_bonus_spawn_follows_draw() {
        for (draw, expected) in [
            (0, Some(BonusKind::ExtraLife)),
            (4, Some(BonusKind::ExtraLife)),
            (5, Some(BonusKind::MultiBall)),
            (10, Some(BonusKind::SmallPlatform)),
            (14, Some(BonusKind::SmallPlatform)),
            (15, None),
            (99, None),
        ] {
            let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 1), bystander()]);
            aim_at_brick_from_below(&mut state, 0);
            let mut draws = ScriptedDraws::new([draw]);
            let events = tick(&mut state, &idle(), &mut draws);
            assert_eq!(draws.remaining(), 0);

            let spawned = events.iter().find_map(|e| match e {
                GameEvent::BonusSpawned { kind, .. } => Some(*kind),
                _ => None,
            });
            assert_eq!(spawned, expected, "draw {draw}");
            assert_eq!(state.bonuses.len(), usize::from(expected.is_some()));
        }
    }

    #[test]
    fn test_thousand_destructions_follow_table() {
        let mut counts = [0usize; 4];
        let mut draws = ScriptedDraws::new((0..1000).map(|i| i % 100));
        for _ in 0..1000 {
            let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 1), bystander()]);
            aim_at_brick_from_below(&mut state, 0);
            let events = tick(&mut state, &idle(), &mut draws);
            let slot = events
                .iter()
                .find_map(|e| match e {
                    GameEvent::BonusSpawned { kind, .. } => Some(match kind {
                        BonusKind::ExtraLife => 0,
                        BonusKind::MultiBall => 1,
                        BonusKind::SmallPlatform => 2,
                    }),
                    _ => None,
                })
                .unwrap_or(3);
            counts[slot] += 1;
        }
        assert_eq!(counts, [50, 50, 50, 850]);
    }

    #[test]
    fn test_hit_does_not_roll() {
        let mut state = RoundState::new(GameConfig::default(), vec![brick_at(100.0, 100.0, 2), bystander()]);
        aim_at_brick_from_below(&mut state, 0);
        let mut draws = ScriptedDraws::new([0]);
        tick(&mut state, &idle(), &mut draws);
        assert_eq!(draws.remaining(), 1);
        assert!(state.bonuses.is_empty());
    }

    fn bonus_on_paddle(state: &mut RoundState, kind: BonusKind) {
        let paddle = state.paddle.rect();
        let size = state.config.bonus_size;
        state.bonuses.push(Bonus::new(
            kind,
            Vec2::new(paddle.center().x - size / 2.0, paddle.top() - size),
            size,
            state.config.bonus_speed,
        ));
    }

    #[test]
    fn test_multi_ball_tops_up_to_three() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        let ball = ball_at(&state, Vec2::new(600.0, 300.0), Vec2::new(0.0, -300.0));
        state.balls = vec![ball];
        bonus_on_paddle(&mut state, BonusKind::MultiBall);

        let events = tick(&mut state, &idle(), &mut ScriptedDraws::never());

        assert_eq!(state.balls.len(), 3);
        assert!(state.bonuses.is_empty());
        assert!(events.contains(&GameEvent::BonusCollected {
            kind: BonusKind::MultiBall
        }));
        // New balls enter at the top, under the brick field
        assert!(state.balls[1..].iter().all(|b| b.pos.y < 100.0 && b.vel.y > 0.0));
    }

    #[test]
    fn test_multi_ball_never_removes_balls() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        state.balls = (0..4)
            .map(|i| ball_at(&state, Vec2::new(200.0 + 100.0 * i as f32, 300.0), Vec2::new(0.0, -300.0)))
            .collect();
        bonus_on_paddle(&mut state, BonusKind::MultiBall);
        tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert_eq!(state.balls.len(), 4);
    }

    #[test]
    fn test_extra_life_bonus() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        bonus_on_paddle(&mut state, BonusKind::ExtraLife);
        tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_small_platform_bonus() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        bonus_on_paddle(&mut state, BonusKind::SmallPlatform);
        tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert!(state.paddle.is_small());
    }

    #[test]
    fn test_missed_bonus_falls_away() {
        let mut state = RoundState::new(GameConfig::default(), vec![bystander()]);
        state
            .bonuses
            .push(Bonus::new(BonusKind::ExtraLife, Vec2::new(10.0, 799.0), 20.0, 150.0));
        tick(&mut state, &idle(), &mut ScriptedDraws::never());
        assert!(state.bonuses.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_same_seed_same_round() {
        use crate::sim::state::seeded_draws;

        let field: Vec<Brick> = (0..10)
            .map(|i| brick_at(10.0 + 110.0 * i as f32, 100.0, 1 + i % 3))
            .collect();
        let mut a = RoundState::new(GameConfig::default(), field.clone());
        let mut b = RoundState::new(GameConfig::default(), field);
        let mut draws_a = seeded_draws(7);
        let mut draws_b = seeded_draws(7);

        for frame in 0..600 {
            let input = TickInput {
                paddle: PaddleInput {
                    left: frame % 90 < 45,
                    right: frame % 90 >= 45,
                },
                quit: false,
            };
            let ea = tick(&mut a, &input, &mut draws_a);
            let eb = tick(&mut b, &input, &mut draws_b);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_destroyed_is_monotonic(seed in any::<u64>(), moves in proptest::collection::vec(0u8..3, 300)) {
            use crate::sim::state::seeded_draws;

            let field: Vec<Brick> = (0..10)
                .flat_map(|i| (0..3).map(move |row| brick_at(10.0 + 110.0 * i as f32, 60.0 + 30.0 * row as f32, 1 + (i + row) % 2)))
                .collect();
            let mut state = RoundState::new(GameConfig::default(), field);
            let mut draws = seeded_draws(seed);
            let mut seen_destroyed = vec![false; state.bricks.len()];

            for m in moves {
                let input = TickInput {
                    paddle: PaddleInput { left: m == 1, right: m == 2 },
                    quit: false,
                };
                tick(&mut state, &input, &mut draws);
                for (i, brick) in state.bricks.iter().enumerate() {
                    if seen_destroyed[i] {
                        prop_assert!(brick.is_destroyed());
                    }
                    seen_destroyed[i] = brick.is_destroyed();
                    prop_assert!(!brick.was_just_destroyed());
                    prop_assert!(!brick.is_hit());
                }
                if state.phase.is_over() {
                    break;
                }
            }
        }
    }
}
