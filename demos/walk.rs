use flood_walk::input::{InputEvent, Key};
use flood_walk::{CellGrid, StepOutcome, Visualizer};
use std::thread;
use std::time::{Duration, Instant};

// In this example the walk is animated on a 10x6 area with shape
//  __________
// |S...#.....|
// |.##.#.###.|
// |..#.#...#.|
// |..#.###.#.|
// |..#.....#G|
// |..#######.|
//  __________
// where
// - # marks a wall
// - S marks the start
// - G marks the finish
//
// Every tick the cursor (@) moves one cell and leaves a trail (*) behind.

const LAYOUT: &str = "
    S...#.....
    .##.#.###.
    ..#.#...#.
    ..#.###.#.
    ..#.....#G
    ..#######.
";

fn main() {
    let grid = CellGrid::from_layout(LAYOUT).expect("Example layout is valid");
    let mut visualizer = Visualizer::from_grid(grid);
    visualizer.set_tick_interval(Duration::from_millis(200));
    println!("{}", visualizer);
    visualizer.handle(InputEvent::Key(Key::Space));
    println!("Labelled:\n{}", visualizer);

    let started = Instant::now();
    loop {
        match visualizer.update(started.elapsed()) {
            Some(StepOutcome::Continue) => println!("{}", visualizer),
            Some(outcome) => {
                println!("{}", visualizer);
                println!("{:?}", outcome);
                break;
            }
            None if !visualizer.session().is_active() => break,
            None => thread::sleep(visualizer.tick_interval() / 10),
        }
    }
}
