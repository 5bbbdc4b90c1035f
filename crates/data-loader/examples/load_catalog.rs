use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading paper catalog...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(data_dir, 3)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (papers, users, ratings) = dataset.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Papers: {}", papers);
    println!("Users: {}", users);
    println!("Ratings: {}", ratings);
}
