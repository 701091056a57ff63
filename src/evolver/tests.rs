//! Test suite for the evolver and population.

use super::*;
use crate::genome::Action;

fn small_config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 12,
        generations: 3,
        mutation_count: 2,
        seed: Some(seed),
        ..EvolutionConfig::default()
    }
}

#[cfg(test)]
mod population {
    use super::*;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let genomes = vec![Genome::uniform(Action::StayPut); 3];
        let result = Population::new(genomes, vec![0.5; 2]);
        assert_eq!(
            result,
            Err(ContractError::LengthMismatch {
                genomes: 3,
                scores: 2
            })
        );
    }

    #[test]
    fn test_random_population_has_uniform_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = Population::random(8, &mut rng);
        assert_eq!(population.len(), 8);
        assert!(population
            .scores()
            .iter()
            .all(|s| (*s - 0.125).abs() < 1e-12));
    }

    #[test]
    fn test_best_picks_highest_score() {
        let genomes = vec![
            Genome::uniform(Action::StayPut),
            Genome::uniform(Action::TryPick),
            Genome::uniform(Action::MoveEast),
        ];
        let population = Population::new(genomes, vec![0.1, 0.7, 0.3]).unwrap();
        let (index, genome, score) = population.best().unwrap();
        assert_eq!(index, 1);
        assert_eq!(genome, &Genome::uniform(Action::TryPick));
        assert_eq!(score, 0.7);
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let genomes = vec![Genome::uniform(Action::StayPut); 3];
        let population = Population::new(genomes, vec![0.0, 0.4, 0.4]).unwrap();
        assert_eq!(population.best().unwrap().0, 1);
    }

    #[test]
    fn test_empty_population_has_no_best() {
        let population = Population::new(vec![], vec![]).unwrap();
        assert!(population.is_empty());
        assert!(population.best().is_none());
        assert_eq!(population.mean_score(), 0.0);
    }
}

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn test_new_validates_config() {
        let config = EvolutionConfig {
            population_size: 1,
            ..small_config(0)
        };
        assert_eq!(
            Evolver::new(config).unwrap_err(),
            ContractError::PopulationTooSmall(1)
        );
    }

    #[test]
    fn test_new_rejects_excess_mutations() {
        let config = EvolutionConfig {
            mutation_count: 500,
            ..small_config(0)
        };
        assert!(Evolver::new(config).is_err());
    }

    #[test]
    fn test_with_population_adopts_its_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let population = Population::random(5, &mut rng);
        let evolver = Evolver::with_population(small_config(0), population).unwrap();
        assert_eq!(evolver.config().population_size, 5);
        assert_eq!(evolver.generation(), 0);
    }

    #[test]
    fn test_with_empty_population_rejected() {
        let population = Population::new(vec![], vec![]).unwrap();
        assert!(Evolver::with_population(small_config(0), population).is_err());
    }
}

#[cfg(test)]
mod breeding {
    use super::*;

    #[test]
    fn test_breed_keeps_population_size() {
        let mut evolver = Evolver::new(small_config(3)).unwrap();
        let children = evolver.breed().unwrap();
        assert_eq!(children.len(), 12);
        for child in &children {
            assert_eq!(child.rules().len(), Genome::LENGTH);
        }
    }

    /// Collapses a genome into its runs of equal consecutive actions.
    fn runs(genome: &Genome) -> Vec<Action> {
        let mut runs: Vec<Action> = Vec::new();
        for rule in genome.rules() {
            if runs.last() != Some(rule) {
                runs.push(*rule);
            }
        }
        runs
    }

    fn unmutated(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            mutation_count: 0,
            ..small_config(seed)
        }
    }

    #[test]
    fn test_children_are_spliced_from_two_parents() {
        let parents = [Action::StayPut, Action::TryPick, Action::MoveNorth];
        let genomes = parents.iter().map(|a| Genome::uniform(*a)).collect();
        let population = Population::new(genomes, vec![1.0; 3]).unwrap();
        let mut evolver = Evolver::with_population(unmutated(15), population).unwrap();

        let mut mixed = 0;
        for _ in 0..10 {
            for child in evolver.breed().unwrap() {
                let runs = runs(&child);
                assert!(runs.len() <= 2, "child has {} runs", runs.len());
                assert!(runs.iter().all(|a| parents.contains(a)));
                if runs.len() == 2 {
                    mixed += 1;
                }
            }
        }
        assert!(mixed > 0);
    }

    #[test]
    fn test_only_scored_parents_contribute() {
        let genomes = vec![
            Genome::uniform(Action::StayPut),
            Genome::uniform(Action::TryPick),
            Genome::uniform(Action::MoveNorth),
            Genome::uniform(Action::MoveEast),
        ];
        let population = Population::new(genomes, vec![0.0, 0.0, 0.5, 0.5]).unwrap();
        let mut evolver = Evolver::with_population(unmutated(16), population).unwrap();

        for _ in 0..10 {
            for child in evolver.breed().unwrap() {
                let runs = runs(&child);
                assert!(runs.len() <= 2);
                assert!(runs
                    .iter()
                    .all(|a| *a == Action::MoveNorth || *a == Action::MoveEast));
            }
        }
    }

    #[test]
    fn test_all_zero_scores_still_breed() {
        let genomes = vec![Genome::uniform(Action::StayPut); 4];
        let population = Population::new(genomes, vec![0.0; 4]).unwrap();
        let mut evolver = Evolver::with_population(small_config(4), population).unwrap();
        assert_eq!(evolver.breed().unwrap().len(), 4);
    }

    #[test]
    fn test_single_survivor_still_breeds() {
        let genomes = vec![Genome::uniform(Action::StayPut); 3];
        let population = Population::new(genomes, vec![0.0, 0.9, 0.0]).unwrap();
        let mut evolver = Evolver::with_population(small_config(5), population).unwrap();
        assert_eq!(evolver.breed().unwrap().len(), 3);
    }

    #[test]
    fn test_negative_scores_rejected() {
        let genomes = vec![Genome::uniform(Action::StayPut); 2];
        let population = Population::new(genomes, vec![-1.0, 0.5]).unwrap();
        let mut evolver = Evolver::with_population(small_config(6), population).unwrap();
        assert_eq!(evolver.breed().unwrap_err(), ContractError::InvalidWeights);
    }
}

#[cfg(test)]
mod evaluation {
    use super::*;

    #[test]
    fn test_losing_policy_scores_exactly_zero() {
        // Always picking fails far more often than it succeeds.
        let mut evolver = Evolver::new(small_config(7)).unwrap();
        let genome = Genome::uniform(Action::TryPick);
        for _ in 0..10 {
            assert_eq!(evolver.evaluate(&genome).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_idle_policy_scores_zero() {
        let mut evolver = Evolver::new(small_config(8)).unwrap();
        let genome = Genome::uniform(Action::StayPut);
        assert_eq!(evolver.evaluate(&genome).unwrap(), 0.0);
    }

    #[test]
    fn test_fitness_within_unit_interval() {
        let mut evolver = Evolver::new(small_config(9)).unwrap();
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..50 {
            let genome = Genome::create_random(&mut rng);
            let fitness = evolver.evaluate(&genome).unwrap();
            assert!((0.0..=1.0).contains(&fitness));
        }
    }
}

#[cfg(test)]
mod generations {
    use super::*;

    #[test]
    fn test_step_reports_best_of_generation() {
        let mut evolver = Evolver::new(small_config(11)).unwrap();
        let report = evolver.step().unwrap();
        assert_eq!(report.generation, 0);
        assert_eq!(evolver.generation(), 1);

        let scores = evolver.population().scores();
        let max = scores.iter().cloned().fold(0.0, f64::max);
        assert_eq!(report.best_fitness, max);
        assert_eq!(scores[report.best_index], max);
        assert!(scores.iter().all(|s| *s >= 0.0));
    }

    #[test]
    fn test_run_feeds_every_generation_to_sink() {
        let mut evolver = Evolver::new(small_config(12)).unwrap();
        let mut seen = Vec::new();
        let mut sink = |r: &GenerationReport| seen.push(r.generation);
        let last = evolver.run(&mut sink).unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(last.map(|r| r.generation), Some(2));
        assert_eq!(evolver.population().len(), 12);
    }

    #[test]
    fn test_zero_generations_reports_nothing() {
        let mut evolver = Evolver::new(small_config(13)).unwrap();
        let mut calls = 0;
        let mut sink = |_: &GenerationReport| calls += 1;
        assert_eq!(evolver.run_for(0, &mut sink).unwrap(), None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let mut a = Evolver::new(small_config(14)).unwrap();
        let mut b = Evolver::new(small_config(14)).unwrap();
        let ra = a.step().unwrap();
        let rb = b.step().unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.population(), b.population());
    }
}
