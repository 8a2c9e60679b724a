use crate::classify::FileClassifier;
use crate::model::{AttributionRecord, ChangedFile, CommitRef, FrequencyMap, SourceFileSet};
use tracing::{debug, info};

/// Touch counts over every file and over classified source files.
#[derive(Debug, Clone)]
pub struct FrequencyFold {
    classifier: FileClassifier,
    pub all: FrequencyMap,
    pub source: FrequencyMap,
}

impl FrequencyFold {
    pub fn new(classifier: FileClassifier) -> Self {
        Self {
            classifier,
            all: FrequencyMap::new(),
            source: FrequencyMap::new(),
        }
    }

    fn fold(&mut self, files: &[ChangedFile]) {
        for file in files {
            self.all.increment(&file.path);
            if self.classifier.is_source_file(&file.path) {
                self.source.increment(&file.path);
                debug!("[SOURCE] {}", file.path);
            } else {
                debug!("[OTHER]  {}", file.path);
            }
        }
    }
}

/// (file, author, date) for every touch of a known source file.
#[derive(Debug, Clone)]
pub struct AttributionFold {
    sources: SourceFileSet,
    pub records: Vec<AttributionRecord>,
}

impl AttributionFold {
    pub fn new(sources: SourceFileSet) -> Self {
        Self {
            sources,
            records: Vec::new(),
        }
    }

    fn fold(&mut self, commit: &CommitRef, files: &[ChangedFile]) {
        let before = self.records.len();
        self.records.extend(
            files
                .iter()
                .filter(|f| self.sources.contains(&f.path))
                .map(|f| AttributionRecord {
                    path: f.path.clone(),
                    author_name: commit.author_name.clone(),
                    author_date: commit.author_date,
                }),
        );
        let found = self.records.len() - before;
        if found > 0 {
            info!("Found {} files in {}", found, commit.message_first_line);
        }
    }
}

/// Fold step of a scan; the mode is fixed when the scan starts.
#[derive(Debug, Clone)]
pub enum Aggregator {
    Frequency(FrequencyFold),
    Attribution(AttributionFold),
}

impl Aggregator {
    pub fn frequency(classifier: FileClassifier) -> Self {
        Aggregator::Frequency(FrequencyFold::new(classifier))
    }

    pub fn attribution(sources: SourceFileSet) -> Self {
        Aggregator::Attribution(AttributionFold::new(sources))
    }

    pub fn fold(&mut self, commit: &CommitRef, files: &[ChangedFile]) {
        match self {
            Aggregator::Frequency(f) => f.fold(files),
            Aggregator::Attribution(a) => a.fold(commit, files),
        }
    }
}
