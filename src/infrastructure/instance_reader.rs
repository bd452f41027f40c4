// Infrastructure: read set cover instances from the OR-library text layout
//
//   m n
//   w_1 w_2 ... w_n            (any number of lines)
//   k_1                        (a line with a single token opens element 1)
//   s s s ...                  (k_1 one-based set indices, any number of lines)
//   k_2
//   ...
//
// The single-token line is the group separator; its value is the length of the
// list that follows, which keeps one-element lists unambiguous.

use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::domain::error::Result;
use crate::domain::{InstanceError, ProblemInstance, SetCoverError};

/// Read and validate an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SetCoverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instance = parse_instance(&text)?;
    debug!(
        "read {}: {} elements, {} sets",
        path.display(),
        instance.universe_size(),
        instance.set_count()
    );
    Ok(instance)
}

/// Parse an instance from its textual description.
pub fn parse_instance(text: &str) -> std::result::Result<ProblemInstance, InstanceError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty());

    let (line, header) = lines.next().ok_or_else(|| InstanceError::Parse {
        line: 1,
        reason: "missing 'm n' header".to_string(),
    })?;
    if header.len() != 2 {
        return Err(InstanceError::Parse {
            line,
            reason: format!("header must hold exactly two counts, found {} tokens", header.len()),
        });
    }
    let universe_size: usize = parse_token(header[0], line, "element count")?;
    let set_count: usize = parse_token(header[1], line, "set count")?;

    let mut weights = Vec::new();
    while weights.len() < set_count {
        let Some((line, tokens)) = lines.next() else {
            return Err(InstanceError::WeightCountMismatch {
                expected: set_count,
                found: weights.len(),
            });
        };
        if weights.len() + tokens.len() > set_count {
            return Err(InstanceError::Parse {
                line,
                reason: format!("more than {} set weights", set_count),
            });
        }
        for token in tokens {
            weights.push(parse_token::<f64>(token, line, "weight")?);
        }
    }

    let mut membership: Vec<Vec<usize>> = Vec::new();
    // (header line, declared length, indices read so far)
    let mut open: Option<(usize, usize, Vec<usize>)> = None;

    for (line, tokens) in lines {
        match open.take() {
            Some((start, declared, mut sets)) if sets.len() < declared => {
                if sets.len() + tokens.len() > declared {
                    return Err(InstanceError::Parse {
                        line,
                        reason: format!(
                            "element {} declares {} sets on line {} but lists more",
                            membership.len() + 1,
                            declared,
                            start
                        ),
                    });
                }
                for token in tokens {
                    sets.push(parse_token(token, line, "set index")?);
                }
                open = Some((start, declared, sets));
            }
            finished => {
                if let Some((_, _, sets)) = finished {
                    membership.push(sets);
                }
                if tokens.len() != 1 {
                    return Err(InstanceError::Parse {
                        line,
                        reason: format!(
                            "expected the set count of element {}, found {} tokens",
                            membership.len() + 1,
                            tokens.len()
                        ),
                    });
                }
                let declared = parse_token(tokens[0], line, "list length")?;
                open = Some((line, declared, Vec::new()));
            }
        }
    }

    if let Some((start, declared, sets)) = open {
        if sets.len() < declared {
            return Err(InstanceError::Parse {
                line: start,
                reason: format!(
                    "element {} declares {} sets but the input ends after {}",
                    membership.len() + 1,
                    declared,
                    sets.len()
                ),
            });
        }
        membership.push(sets);
    }

    ProblemInstance::from_one_based(universe_size, set_count, weights, membership)
}

fn parse_token<T: FromStr>(
    token: &str,
    line: usize,
    what: &str,
) -> std::result::Result<T, InstanceError> {
    token.parse().map_err(|_| InstanceError::Parse {
        line,
        reason: format!("invalid {} '{}'", what, token),
    })
}
