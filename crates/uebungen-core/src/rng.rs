// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for scrambling
/// exercise content.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max).
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Fisher–Yates shuffle over a copy of `items`. The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut TinyRng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.generate(i as u32 + 1) as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let input = vec![1, 2, 3, 4];
        let mut rng = TinyRng::from_seed(42);
        let shuffled = shuffle(&input, &mut rng);
        assert_eq!(input, vec![1, 2, 3, 4]);
        assert_eq!(shuffled.len(), input.len());
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let input = vec!["a", "b", "a", "c", "a"];
        let mut rng = TinyRng::from_seed(7);
        let mut shuffled = shuffle(&input, &mut rng);
        shuffled.sort();
        assert_eq!(shuffled, vec!["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_short_inputs() {
        let mut rng = TinyRng::from_seed(1);
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty, &mut rng).is_empty());
        assert_eq!(shuffle(&["x"], &mut rng), vec!["x"]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Over enough seeds, each element should land in each slot.
        let input = [0usize, 1, 2, 3];
        let mut seen = [[false; 4]; 4];
        for seed in 0..200 {
            let mut rng = TinyRng::from_seed(seed);
            for (slot, value) in shuffle(&input, &mut rng).into_iter().enumerate() {
                seen[value][slot] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }

    #[test]
    fn test_same_seed_same_order() {
        let input: Vec<u32> = (0..10).collect();
        let a = shuffle(&input, &mut TinyRng::from_seed(99));
        let b = shuffle(&input, &mut TinyRng::from_seed(99));
        assert_eq!(a, b);
    }
}
