use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{NodeId, Tree};
use crate::naming::PathStyle;

/// One parsed row of the citation dataset:
/// `author, title, year, categories, url, citations`, where `categories`
/// is a `": "`-delimited path.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRecord {
    pub authors: String,
    pub title: String,
    pub year: String,
    pub categories: Vec<String>,
    pub doi: String,
    pub citations: u64,
}

/// Parse every data row of the dataset. The first row is a header and is
/// skipped.
pub fn read_records(reader: impl Read) -> Result<Vec<PaperRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(i + 2);
        records.push(parse_record(&record, line)?);
    }
    Ok(records)
}

fn parse_record(record: &csv::StringRecord, line: usize) -> Result<PaperRecord> {
    if record.len() < 6 {
        return Err(Error::MalformedRecord { line });
    }
    let citations = record[5].trim().parse().map_err(|_| Error::InvalidCitations {
        line,
        value: record[5].to_string(),
    })?;
    Ok(PaperRecord {
        authors: record[0].to_string(),
        title: record[1].to_string(),
        year: record[2].to_string(),
        categories: record[3].split(": ").map(str::to_string).collect(),
        doi: record[4].to_string(),
        citations,
    })
}

/// Nested grouping of records on their way into a tree. A paper sits in
/// the group named by the final key of its grouping path.
#[derive(Debug, Default)]
struct Group {
    papers: Vec<(String, u64)>,
    subs: BTreeMap<String, Group>,
}

impl Group {
    fn insert(&mut self, keys: &[String], title: String, citations: u64) {
        if let Some((head, rest)) = keys.split_first() {
            let slot = self.subs.entry(head.clone()).or_default();
            if rest.is_empty() {
                slot.papers.push((title, citations));
            } else {
                slot.insert(rest, title, citations);
            }
        }
    }
}

/// Parse the dataset from `reader` and build its tree under a root named
/// `root_name`. Rows group by year first when `by_year`, then by each
/// category component. At every level the paper leaves come first, in row
/// order, followed by the subcategories in sorted name order, which keeps
/// repeated loads of the same data identical. A row with an empty grouping
/// path is dropped.
pub fn load_papers(reader: impl Read, root_name: &str, by_year: bool) -> Result<Tree> {
    let records = read_records(reader)?;
    let mut top = Group::default();
    for paper in &records {
        let mut keys = Vec::new();
        if by_year {
            keys.push(paper.year.clone());
        }
        keys.extend(paper.categories.iter().cloned());
        top.insert(&keys, paper.title.clone(), paper.citations);
    }

    let mut tree = Tree::new();
    let root = build_group(&mut tree, root_name, &top);
    let total = tree.node(root).weight;
    debug!(rows = records.len(), total, "loaded citation dataset");
    Ok(tree)
}

/// Convenience wrapper opening `path` and delegating to [`load_papers`].
pub fn load_papers_path(path: impl AsRef<Path>, root_name: &str, by_year: bool) -> Result<Tree> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_papers(file, root_name, by_year)
}

fn build_group(tree: &mut Tree, name: &str, group: &Group) -> NodeId {
    let mut children = Vec::new();
    for (title, citations) in &group.papers {
        children.push(tree.leaf(title.clone(), *citations));
    }
    for (key, sub) in &group.subs {
        children.push(build_group(tree, key, sub));
    }
    tree.branch(name, children)
}

/// Path/suffix rendering for citation trees.
pub struct PaperStyle;

impl PathStyle for PaperStyle {
    fn separator(&self) -> &str {
        "/"
    }

    fn suffix(&self, tree: &Tree, id: NodeId) -> String {
        let node = tree.node(id);
        if node.children.is_empty() {
            format!(" (file, {} citations)", node.weight)
        } else {
            format!(
                " (category, {} items, {} citations)",
                node.children.len(),
                node.weight
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "author,title,year,categories,url,citations\n";

    #[test]
    fn categories_split_on_colon_space() {
        let data = format!("{HEADER}A. Author,Paper,2011,CS1: Assessment: Exams,doi,12\n");
        let records = read_records(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].categories, vec!["CS1", "Assessment", "Exams"]);
        assert_eq!(records[0].citations, 12);
    }

    #[test]
    fn short_rows_are_rejected_with_their_line_number() {
        let data = format!("{HEADER}A. Author,Paper,2011,CS1\n");
        let err = read_records(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 2 }));
    }

    #[test]
    fn unparsable_citation_counts_are_rejected() {
        let data = format!("{HEADER}ok,ok,2011,CS1,doi,5\nA. Author,Paper,2011,CS1,doi,many\n");
        let err = read_records(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::InvalidCitations { line: 3, .. }));
    }
}
