use chrono::{Duration, Utc};
use draftsplit::{
    DistanceConfig, DistanceListing, MergeListing, Population, TableSplitter, TreeDump,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two simulated draft rounds over a random pool.
    //
    // Round 1 prints every diagnostic and tries a handful of table layouts,
    // some of which are invalid on purpose. Round 2 replays pairings inside
    // each table, feeds the new ratings and history back, and rebuilds.
    //
    // RUST_LOG=draftsplit=debug shows the pipeline stages.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let now = Utc::now();
    let mut population = Population::new(2024, now);

    // Ids do not have to start at zero.
    let all = population.participants(0, 100, 1000..=2000, 30);
    let mut players = all[30..47].to_vec();
    let mut history = population.encounters(&players, 100, 30)?;

    let config = DistanceConfig::new()
        .with_skill_weight(0.5)
        .with_reference_time(now);
    let splitter = TableSplitter::new(players.clone(), &history, config)?;

    print!("{}", DistanceListing(&splitter));
    println!();
    print!("{}", MergeListing(&splitter));
    println!();
    print!("{}", TreeDump(&splitter));
    println!();

    let requests: [&[usize]; 5] = [&[8, 9], &[6, 6, 5], &[8, 8, 1], &[8, 8], &[8, 9, 0]];
    for sizes in requests {
        println!("Split targets: {sizes:?}");
        match splitter.split(sizes) {
            Ok(tables) => {
                for table in tables {
                    println!("Table of {} players:", table.len());
                    for player in table {
                        println!("    {player}");
                    }
                }
            }
            Err(e) => println!("    rejected: {e}"),
        }
        println!();
    }

    // Round 2: everyone at a table plays their neighbour.
    let round_time = now + Duration::hours(1);
    let tables: Vec<Vec<u64>> = splitter
        .split(&[6, 6, 5])?
        .into_iter()
        .map(|t| t.into_iter().map(|p| p.id).collect())
        .collect();
    for table in &tables {
        for pair in table.chunks(2) {
            let [a, b] = pair else { continue };
            let ia = players.iter().position(|p| p.id == *a);
            let ib = players.iter().position(|p| p.id == *b);
            let (Some(ia), Some(ib)) = (ia, ib) else {
                continue;
            };
            let (lo, hi) = (ia.min(ib), ia.max(ib));
            let (left, right) = players.split_at_mut(hi);
            history.push(population.play(&mut left[lo], &mut right[0], round_time));
        }
    }

    let next = TableSplitter::new(
        players,
        &history,
        DistanceConfig::new().with_reference_time(round_time),
    )?;
    println!("Round 2 tables:");
    for table in next.split(&[6, 6, 5])? {
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        println!("    {}", names.join(", "));
    }

    Ok(())
}
