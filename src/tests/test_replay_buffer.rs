use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::replay_buffer::{Experience, ReplayMemory};

fn tagged(tag: usize) -> Experience {
    Experience::new(array![tag as f32], tag % 2, tag as f32, array![(tag + 1) as f32])
}

#[test]
fn test_replay_memory_add_and_sample() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut memory = ReplayMemory::new(10);
    assert!(memory.is_empty());
    assert!(memory.sample(&mut rng).is_none());

    let experience = tagged(3);
    assert_eq!(memory.add(experience.clone(), &mut rng), None);
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.sample(&mut rng), Some(&experience));
}

#[test]
fn test_replay_memory_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut memory = ReplayMemory::new(5);

    for i in 0..5 {
        assert_eq!(memory.add(tagged(i), &mut rng), None);
    }
    assert!(memory.is_full());

    for i in 5..100 {
        let slot = memory.add(tagged(i), &mut rng);
        assert!(matches!(slot, Some(s) if s < 5));
        assert_eq!(memory.len(), 5);
    }
    assert_eq!(memory.capacity(), 5);
}

#[test]
fn test_replay_memory_overwrites_randomly_not_fifo() {
    let mut rng = StdRng::seed_from_u64(2024);
    let capacity = 10;
    let mut survived = [0usize; 10];
    let mut evicted = [0usize; 10];

    for _ in 0..200 {
        let mut memory = ReplayMemory::new(capacity);
        for i in 0..capacity {
            memory.add(tagged(i), &mut rng);
        }
        for i in capacity..2 * capacity {
            memory.add(tagged(i), &mut rng);
        }

        for original in 0..capacity {
            let kept = memory.iter().any(|e| e.state0[0] == original as f32);
            if kept {
                survived[original] += 1;
            } else {
                evicted[original] += 1;
            }
        }
    }

    // FIFO would evict every original; random overwrite keeps each one
    // with probability 0.9^10 per trial.
    for original in 0..capacity {
        assert!(survived[original] > 0, "experience {} was never kept", original);
        assert!(evicted[original] > 0, "experience {} was never evicted", original);
    }
}

#[test]
fn test_replay_memory_sampling_covers_contents() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut memory = ReplayMemory::new(4);
    for i in 0..4 {
        memory.add(tagged(i), &mut rng);
    }

    let mut seen = [false; 4];
    for _ in 0..200 {
        let experience = memory.sample(&mut rng).unwrap();
        seen[experience.state0[0] as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
