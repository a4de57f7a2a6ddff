use geo::{Distance, Haversine, Point};
use geoddb::{GeoIndex, IndexConfig, KeyCondition, MemoryStore, QueryOptions, Record};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see the fan-out)
    env_logger::init();

    println!("=== geoddb - Nearby Search ===\n");

    // One physical table shared by two logical indexes.
    let store = std::sync::Arc::new(
        MemoryStore::new("PK")
            .with_sort_field("SK")
            .with_page_size(2),
    );
    let config = IndexConfig::default().with_precision(6);
    let cafes = GeoIndex::new(store.clone(), config.clone().with_prefix("cafe#"))?;
    let museums = GeoIndex::new(store.clone(), config.with_prefix("museum#"))?;

    let places = [
        (&cafes, "Café de Flore", 48.8541, 2.3326),
        (&cafes, "Les Deux Magots", 48.8540, 2.3331),
        (&cafes, "Café Procope", 48.8530, 2.3389),
        (&cafes, "Café Kitsuné", 48.8637, 2.3370),
        (&museums, "Musée d'Orsay", 48.8600, 2.3266),
        (&museums, "Louvre", 48.8606, 2.3376),
    ];

    for (index, name, lat, lon) in places {
        let record: Record = json!({ "SK": name, "lat": lat, "lon": lon })
            .as_object()
            .cloned()
            .unwrap_or_default();
        index.put_point(lat, lon, record)?;
        println!("   Stored {:<18} under {}", name, index.partition_key(&index.geohash(lat, lon)));
    }
    println!("\n   Partitions in use: {:?}\n", store.partition_keys());

    // Candidates from the center cell and its 8 neighbors.
    let (lat, lon) = (48.8538, 2.3340);
    let candidates = cafes.query(lat, lon, &QueryOptions::default().with_concurrency(true))?;
    println!("1. Cafés in the 9 cells around ({lat}, {lon}): {}", candidates.len());

    // Exact radius is the caller's job.
    let origin = Point::new(lon, lat);
    for record in &candidates {
        let at = Point::new(
            record["lon"].as_f64().unwrap_or_default(),
            record["lat"].as_f64().unwrap_or_default(),
        );
        let meters = Haversine.distance(origin, at);
        let marker = if meters <= 300.0 { "within 300m" } else { "further" };
        let name = record["SK"].as_str().unwrap_or_default();
        println!("     - {:<18} {:>6.0}m  {}", name, meters, marker);
    }

    // Extra key condition pushed down to every partition query.
    let options = QueryOptions::default().with_filter(KeyCondition::begins_with("SK", "Les"));
    let filtered = cafes.query(lat, lon, &options)?;
    println!("\n2. Cafés starting with \"Les\": {}", filtered.len());

    let first_pages = cafes.query(lat, lon, &QueryOptions::default().with_all_pages(false))?;
    println!("3. First page of each cell only: {} record(s)", first_pages.len());

    let stats = store.stats();
    println!(
        "\n   Store: {} items in {} partitions, {} writes, {} page requests",
        stats.item_count, stats.partition_count, stats.write_count, stats.query_count
    );

    Ok(())
}
