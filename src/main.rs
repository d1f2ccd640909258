//! Headless demo driving three movement policies on one map

use tile_engine::prelude::*;
use winit::event::ElementState;

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 600;

/// Tiles the seeker patrols between
const PATROL: [TileIndex; 3] = [
    TileIndex::new(6, 10),
    TileIndex::new(1, 10),
    TileIndex::new(6, 1),
];

/// Scripted key presses: (frame, key, state)
const KEY_SCRIPT: [(u32, KeyCode, ElementState); 6] = [
    (10, KeyCode::ArrowRight, ElementState::Pressed),
    (70, KeyCode::ArrowRight, ElementState::Released),
    (90, KeyCode::ArrowDown, ElementState::Pressed),
    (95, KeyCode::ArrowDown, ElementState::Released),
    (200, KeyCode::ArrowUp, ElementState::Pressed),
    (260, KeyCode::ArrowUp, ElementState::Released),
];

/// Demo state: one map, three movers
struct Demo {
    map: TileMap,
    world: World,
    input: Input,
    policies: Vec<MovementPolicy>,
    next_patrol: usize,
}

impl Demo {
    fn new(config: &MovementConfig) -> Result<Self, MovementError> {
        let map = build_map();
        let mut world = World::new();
        let mut input = Input::new();

        let seeker = world.spawn_body("seeker", GridBody::new(map.position_of(TileIndex::new(1, 1))));
        let wanderer = world.spawn_body("wanderer", GridBody::new(map.position_of(TileIndex::new(4, 8))));
        let player = world.spawn_body("player", GridBody::new(map.position_of(TileIndex::new(6, 4))));

        let mut ctx = MoveContext::new(&map, &mut world);
        let target = TargetGridMover::from_config(&mut ctx, seeker, config)?;
        let mut random = RandomGridMover::from_config(&mut ctx, wanderer, config)?;
        random.start_movement(&mut ctx);
        let keyboard = KeyboardControlledGridMover::from_config(&mut ctx, &mut input, player, config)?;

        let mut policies: Vec<MovementPolicy> = vec![target.into(), random.into(), keyboard.into()];
        for policy in &mut policies {
            let kind = policy.kind_name();
            for name in [
                MovementEvent::DIRECTION_CHANGED,
                MovementEvent::OBSTACLE_HIT,
                MovementEvent::DESTINATION_REACHED,
            ] {
                policy
                    .mover_mut()
                    .subscribe(name, move |event| log::info!("[{kind}] {event:?}"));
            }
        }

        Ok(Self {
            map,
            world,
            input,
            policies,
            next_patrol: 0,
        })
    }

    fn update(&mut self, frame: u32) {
        for (at, key, state) in KEY_SCRIPT {
            if at == frame {
                self.input.process_keyboard(key, state);
            }
        }

        let mut ctx = MoveContext::new(&self.map, &mut self.world);

        if let Some(MovementPolicy::Target(seeker)) = self.policies.first_mut() {
            if !seeker.mover().is_moving() {
                let destination = PATROL[self.next_patrol % PATROL.len()];
                self.next_patrol += 1;
                log::info!("Seeker patrols to {destination}");
                seeker.set_destination(&mut ctx, destination);
            }
        }

        for policy in &mut self.policies {
            if let Some(tile) = policy.update(&mut ctx, FRAME_TIME) {
                log::debug!("[{}] reached {tile}", policy.kind_name());
            }
        }

        self.input.update();
    }

    fn report(&self) {
        for policy in &self.policies {
            let entity = policy.mover().entity();
            log::info!(
                "{} ({}) rests near {}",
                self.world.display_name(entity),
                policy.kind_name(),
                policy.mover().current_tile()
            );
        }
    }
}

/// 8x12 room with an inner wall and a gap
fn build_map() -> TileMap {
    let mut map = TileMap::new(8, 12, 16.0);
    for column in 0..12 {
        map.set_collidable(TileIndex::new(0, column), true);
        map.set_collidable(TileIndex::new(7, column), true);
    }
    for row in 0..8 {
        map.set_collidable(TileIndex::new(row, 0), true);
        map.set_collidable(TileIndex::new(row, 11), true);
    }
    for row in 1..6 {
        map.set_collidable(TileIndex::new(row, 6), true);
    }
    map.add_obstacle(TileIndex::new(3, 3));
    map
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match MovementConfig::load_ron(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return;
            }
        },
        None => MovementConfig::default().with_seed(7),
    };

    let mut demo = match Demo::new(&config) {
        Ok(demo) => demo,
        Err(e) => {
            eprintln!("Movement error: {}", e);
            return;
        }
    };

    for frame in 0..FRAMES {
        demo.update(frame);
    }
    demo.report();
}
