use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Bulk table covering the whole CJK range searches accept.
const BULK_TABLE: &str = "strokes_cns11643.tsv";
/// Hand-checked rows that override the bulk table.
const CURATED_TABLE: &str = "strokes.tsv";

fn main() {
    println!("cargo:rerun-if-changed=assets/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("stroke_table.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let asset_dir = Path::new("assets");
    let mut rows = read_table(&asset_dir.join(BULK_TABLE));
    rows.extend(read_table(&asset_dir.join(CURATED_TABLE)));

    // BTreeMap iterates in key order, so lookups can binary search
    writeln!(f, "pub const STROKE_TABLE: &[(char, &str)] = &[").unwrap();
    for (c, strokes) in &rows {
        writeln!(f, "    ({:?}, {:?}),", c, strokes).unwrap();
    }
    writeln!(f, "];").unwrap();
}

/// Each row: <character> TAB <stroke digits>. Digits are the five canonical
/// stroke classes, 1 (heng) through 5 (zhe). A missing file is an empty table.
fn read_table(path: &Path) -> BTreeMap<char, String> {
    let mut rows = BTreeMap::new();
    if !path.exists() {
        return rows;
    }
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("table");
    let content = fs::read_to_string(path).unwrap();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let character = fields.next().unwrap_or("");
        let strokes = fields.next().unwrap_or("").trim();

        let mut chars = character.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            panic!("{}:{}: expected a single character, got {:?}", name, line_no + 1, character);
        };
        if strokes.is_empty() || !strokes.chars().all(|d| ('1'..='5').contains(&d)) {
            panic!("{}:{}: invalid stroke sequence {:?}", name, line_no + 1, strokes);
        }
        if rows.insert(c, strokes.to_string()).is_some() {
            panic!("{}:{}: duplicate entry for {}", name, line_no + 1, c);
        }
    }
    rows
}
