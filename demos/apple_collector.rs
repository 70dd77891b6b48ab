/***
# Collect the apples.

* The world is a ring of cells holding the player and one apple.
* The player senses which way the apple is and how far away it is.
* There are three actions: move left, stay in place, and move right.
* Landing on the apple earns +1 and a new apple appears in a random cell.
* Every other step costs a little, so the shortest route pays best.
***/

use deepq::{
    activations::Activation,
    agent::Brain,
    config::BrainConfigBuilder,
    optimizer::TrainerOptions,
};
use ndarray::{array, Array1};
use rand::Rng;

// Parameters of the world and of the training run.
const RING_SIZE: usize = 12;
const STEP_COST: f32 = -0.01;
const TRAINING_STEPS: usize = 30_000;
const EVALUATION_STEPS: usize = 2_000;
const REPORT_EVERY: usize = 5_000;

struct AppleRing {
    player: usize,
    apple: usize,
}

impl AppleRing {
    fn new() -> Self {
        AppleRing { player: 0, apple: RING_SIZE / 2 }
    }

    /// Signed shortest offset from the player to the apple around the ring.
    fn offset(&self) -> isize {
        let forward = (self.apple + RING_SIZE - self.player) % RING_SIZE;
        if forward <= RING_SIZE / 2 {
            forward as isize
        } else {
            forward as isize - RING_SIZE as isize
        }
    }

    fn observe(&self) -> Array1<f32> {
        let offset = self.offset();
        array![
            if offset < 0 { 1.0 } else { 0.0 },
            if offset > 0 { 1.0 } else { 0.0 },
            offset.unsigned_abs() as f32 / (RING_SIZE / 2) as f32,
        ]
    }

    fn act(&mut self, action: usize) -> f32 {
        match action {
            0 => self.player = (self.player + RING_SIZE - 1) % RING_SIZE,
            1 => {}
            _ => self.player = (self.player + 1) % RING_SIZE,
        }

        if self.player == self.apple {
            let mut rng = rand::thread_rng();
            while self.apple == self.player {
                self.apple = rng.gen_range(0..RING_SIZE);
            }
            1.0
        } else {
            STEP_COST
        }
    }
}

fn main() -> deepq::Result<()> {
    env_logger::init();
    let now = std::time::Instant::now();

    let config = BrainConfigBuilder::new(3, 3)
        .temporal_window(2)
        .experience_size(10_000)
        .gamma(0.9)
        .learning_steps(1_000, 20_000)
        .hidden_layers(&[24, 24], Activation::Relu)
        .trainer(TrainerOptions { learning_rate: 0.01, momentum: 0.9, batch_size: 32, l2_decay: 0.001 })
        .build()?;
    let mut brain = Brain::new(config)?;
    let mut world = AppleRing::new();

    let mut apples = 0;
    for step in 1..=TRAINING_STEPS {
        let action = brain.step_forward(world.observe().view())?;
        let reward = world.act(action);
        if reward > 0.0 {
            apples += 1;
        }
        brain.step_backward(reward)?;

        if step % REPORT_EVERY == 0 {
            println!("--- step {} ({} apples so far)", step, apples);
            println!("{}", brain.stats());
        }
    }

    brain.set_learning(false);
    let mut evaluation_apples = 0;
    for _ in 0..EVALUATION_STEPS {
        let action = brain.step_forward(world.observe().view())?;
        let reward = world.act(action);
        if reward > 0.0 {
            evaluation_apples += 1;
        }
        brain.step_backward(reward)?;
    }

    println!(
        "Evaluation: {} apples in {} steps (a perfect player averages about one per {} steps)",
        evaluation_apples,
        EVALUATION_STEPS,
        RING_SIZE / 4
    );
    println!("Time taken: {:?}", now.elapsed());
    Ok(())
}
