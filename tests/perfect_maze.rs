use std::collections::VecDeque;

use maze_game::{generate_maze, place_enemy, Dir, Grid, MazeSize, Pos, Session, Status, Tile};
use proptest::{prop_assert, prop_assert_eq};
use proptest::{
    arbitrary::any,
    collection::vec,
    sample::select,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn open(grid: &Grid, pos: Pos) -> bool {
    grid.cell_at(pos) != Tile::Wall
}

fn reachable_from(grid: &Grid, start: Pos) -> Vec<Pos> {
    let size = grid.size();
    let mut seen = vec![vec![false; size]; size];
    let mut order = Vec::new();
    let mut q = VecDeque::new();
    seen[start.row][start.col] = true;
    q.push_back(start);
    while let Some(pos) = q.pop_front() {
        order.push(pos);
        for dir in Dir::ALL {
            if let Some(next) = grid.open_step(pos, dir) {
                if !seen[next.row][next.col] {
                    seen[next.row][next.col] = true;
                    q.push_back(next);
                }
            }
        }
    }
    order
}

fn open_edges(grid: &Grid) -> usize {
    grid.cells()
        .filter(|(_, tile)| *tile != Tile::Wall)
        .map(|(pos, _)| {
            [Dir::Down, Dir::Right]
                .into_iter()
                .filter(|dir| grid.open_step(pos, *dir).is_some())
                .count()
        })
        .sum()
}

fn sized(size: usize) -> MazeSize {
    MazeSize::new(size as i64).unwrap()
}

fn check_maze(seed: u64, size: usize) -> Result<(), TestCaseError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = generate_maze(&mut rng, sized(size));
    let grid = &maze.grid;

    let exits: Vec<Pos> = grid
        .cells()
        .filter(|(_, tile)| *tile == Tile::Exit)
        .map(|(pos, _)| pos)
        .collect();
    prop_assert_eq!(exits, vec![Pos::new(size - 1, size - 1)]);

    let open_cells = grid.cells().filter(|(_, tile)| *tile != Tile::Wall).count();
    let reachable = reachable_from(grid, maze.start);
    prop_assert_eq!(reachable.len(), open_cells, "size {} seed {}", size, seed);
    prop_assert!(reachable.contains(&maze.exit));
    prop_assert_eq!(open_edges(grid), open_cells - 1, "cycle at size {} seed {}", size, seed);
    Ok(())
}

#[test]
fn generated_mazes_are_spanning_trees() {
    let mut runner = TestRunner::new(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    });
    runner
        .run(&(any::<u64>(), 1usize..40), |(seed, size)| check_maze(seed, size))
        .unwrap();
}

#[test]
fn every_small_size_reaches_its_exit() {
    for size in 1..=24 {
        for seed in 0..8 {
            check_maze(seed, size).unwrap();
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Input {
    Player(Dir),
    Enemy,
    Clock,
}

fn play(seed: u64, size: usize, inputs: &[Input]) -> Result<(), TestCaseError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = generate_maze(&mut rng, sized(size));
    let enemy = place_enemy(&mut rng, &maze.grid, maze.start, maze.exit);
    let mut session = Session::new(maze, enemy);

    for input in inputs {
        let before = session.snapshot();
        match *input {
            Input::Player(dir) => {
                let target = session.grid().open_step(before.player, dir);
                let moved = session.attempt_player_move(dir);
                if before.status != Status::Active {
                    prop_assert!(!moved);
                } else {
                    prop_assert_eq!(moved, target.is_some());
                }
                if moved {
                    prop_assert_eq!(Some(session.player()), target);
                } else {
                    prop_assert_eq!(&session.snapshot(), &before);
                }
            }
            Input::Enemy => {
                let moved = session.tick_enemy(&mut rng);
                if moved {
                    prop_assert_eq!(session.enemy().manhattan(before.enemy), 1);
                    prop_assert!(open(session.grid(), session.enemy()));
                }
            }
            Input::Clock => {
                session.tick_clock();
            }
        }
        let now = session.snapshot();
        if before.status != Status::Active {
            prop_assert_eq!(&now, &before);
        }
        if now.player == now.exit {
            prop_assert_eq!(now.status, Status::Won);
        }
        if now.status == Status::Lost {
            prop_assert_eq!(now.player, now.enemy);
        }
    }
    Ok(())
}

#[test]
fn sessions_follow_the_rules() {
    let input = select(vec![
        Input::Player(Dir::Up),
        Input::Player(Dir::Down),
        Input::Player(Dir::Left),
        Input::Player(Dir::Right),
        Input::Enemy,
        Input::Clock,
    ]);
    let mut runner = TestRunner::new(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    });
    runner
        .run(
            &(any::<u64>(), 2usize..16, vec(input, 0..200)),
            |(seed, size, inputs)| play(seed, size, &inputs),
        )
        .unwrap();
}
