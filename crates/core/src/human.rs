/// Format a byte count with two decimals against powers of 1024, capped at
/// terabytes: `58.00B`, `2.00kB`, `1.50MB`.
pub fn human_bytes(b: u64) -> String {
    let mut n = b as f64;
    let units = ["B", "kB", "MB", "GB", "TB"];
    let mut u = 0;
    while n >= 1024.0 && u < units.len() - 1 {
        n /= 1024.0;
        u += 1;
    }
    format!("{:.2}{}", n, units[u])
}
