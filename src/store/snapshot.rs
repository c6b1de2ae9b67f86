use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::listing::{Listing, HEADER};
use crate::store::SnapshotStore;
use crate::util::write_atomic;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "listings.csv";

/// Snapshot kept as a CSV file with a `Title,Price,Mileage,City,Distance`
/// header row.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for CsvStore {
    fn load(&self) -> Vec<Listing> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet, starting from empty baseline");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "snapshot unreadable, starting from empty baseline");
                return Vec::new();
            }
        };

        let rows = match read_rows(file) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "snapshot is not valid csv, starting from empty baseline");
                return Vec::new();
            }
        };

        // header plus at least zero data rows
        if rows.len() < 2 {
            return Vec::new();
        }

        let mut listings = Vec::with_capacity(rows.len() - 1);
        for (line, row) in rows.iter().enumerate().skip(1) {
            match Listing::from_row(row.iter()) {
                Some(listing) => listings.push(listing),
                None => debug!(
                    path = %self.path.display(),
                    line = line + 1,
                    fields = row.len(),
                    "skipping malformed snapshot row"
                ),
            }
        }

        listings
    }

    fn save(&mut self, listings: &[Listing]) -> Result<()> {
        write_atomic(&self.path, |out| {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(HEADER)?;
            for listing in listings {
                writer.write_record(listing.fields())?;
            }
            writer.flush().map_err(csv::Error::from)?;
            Ok(())
        })?;

        info!(path = %self.path.display(), listings = listings.len(), "snapshot saved");
        Ok(())
    }
}

fn read_rows(file: File) -> csv::Result<Vec<csv::StringRecord>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file)
        .into_records()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CsvStore {
        CsvStore::new(dir.path().join(DEFAULT_SNAPSHOT_PATH))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn round_trip_preserves_fields_and_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let listings = vec![
            Listing::new("Camry 2021", "$18,000", "40,000 mi", "Athens", "5 mi"),
            Listing::new("Camry \"SE\"", "$19,500", "22,000 mi", "Atlanta, GA", "60 mi"),
            Listing::new("", "", "", "", ""),
        ];
        store.save(&listings).unwrap();

        assert_eq!(store.load(), listings);
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store
            .save(&[Listing::new("Corolla", "$15,000", "30,000 mi", "Macon", "80 mi")])
            .unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "Title,Price,Mileage,City,Distance\nCorolla,\"$15,000\",\"30,000 mi\",Macon,80 mi\n"
        );
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store
            .save(&[
                Listing::new("a", "1", "1", "x", "y"),
                Listing::new("b", "2", "2", "x", "y"),
            ])
            .unwrap();
        store.save(&[Listing::new("c", "3", "3", "x", "y")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![Listing::new("c", "3", "3", "x", "y")]);
    }

    #[test]
    fn empty_set_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.save(&[]).unwrap();
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "Title,Price,Mileage,City,Distance\n"
        );
        assert!(store.load().is_empty());
    }

    #[test]
    fn short_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Title,Price,Mileage,City,Distance\n\
             a,1,1,x,y\n\
             broken,row\n\
             b,2,2,x,y,extra\n",
        )
        .unwrap();

        assert_eq!(
            store.load(),
            vec![
                Listing::new("a", "1", "1", "x", "y"),
                Listing::new("b", "2", "2", "x", "y"),
            ]
        );
    }

    #[test]
    fn header_only_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Title,Price,Mileage,City,Distance\n").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn unparseable_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        // invalid utf-8 cannot become a StringRecord
        fs::write(store.path(), b"Title,Price\n\xff\xfe,\xff\n").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn save_into_missing_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::new(dir.path().join("state").join("listings.csv"));

        store.save(&[Listing::new("a", "1", "1", "x", "y")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // a directory where the snapshot file should be makes the rename fail
        let path = dir.path().join("listings.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = CsvStore::new(&path);
        assert!(store.save(&[Listing::new("a", "1", "1", "x", "y")]).is_err());
    }
}
