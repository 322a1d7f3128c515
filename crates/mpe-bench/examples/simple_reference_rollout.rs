//! Random-policy rollout of `simple_reference`.
//!
//! Demonstrates: make_env → reset → step with sampled actions → render →
//! reset → repeat. Pass a scenario name as the first argument to roll out
//! a different built-in scenario.

use mpe::prelude::*;
use mpe_bench::uniform_actions;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "simple_reference".to_string());
    println!("=== MPE rollout: {name} ===\n");

    let mut env = make_env(&name, false)?;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    println!("agents: {}", env.n());
    for (i, (act, obs)) in env
        .action_space()
        .iter()
        .zip(env.observation_space())
        .enumerate()
    {
        println!("  agent {i}: action {act:?}, observation dim {}", obs.flat_dim());
    }

    for episode in 0..2 {
        env.reset_with_seed(episode)?;
        let mut returns = vec![0.0f32; env.n()];
        for t in 0..100 {
            let actions = uniform_actions(&env, &mut rng);
            let step = env.step(&actions)?;
            for (ret, r) in returns.iter_mut().zip(&step.rewards) {
                *ret += r;
            }
            if t % 25 == 0 {
                print!("{}", env.render());
                println!("    step time={}us", env.last_metrics().total_us);
            }
            if step.all_done() {
                break;
            }
        }
        println!("episode {episode}: returns {returns:?}\n");
    }
    Ok(())
}
