use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::board::{Board, Label};
use crate::location::{Dimension, Location};
use crate::step::SquareStep;

/// Reasons a builder may become invalid while building.
///
/// The first four indicate the upstream producer of the grid violated its contract; they surface
/// as a hard construction failure rather than a "no solution" result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderInvalidReason {
    /// A label or wall was placed outside the bounds specified on the builder.
    FeatureOutOfBounds,
    /// The input grid had no rows or no columns.
    EmptyGrid,
    /// The input grid was not rectangular.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The same label value was placed on two cells.
    DuplicateLabel {
        /// The repeated label.
        label: Label,
        /// The two cells carrying it.
        locations: UnorderedPair<Location>,
    },
    /// The labels present do not form the contiguous set `1..=max`.
    LabelGap {
        /// The smallest absent label.
        missing: Label,
        /// The highest label present.
        max: Label,
    },
}

impl Display for BuilderInvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeatureOutOfBounds => write!(f, "feature placed out of bounds"),
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "row {} has {} cells but row 0 has {}", row, found, expected)
            }
            Self::DuplicateLabel { label, locations } => {
                write!(f, "label {} appears at both {} and {}", label, locations.0, locations.1)
            }
            Self::LabelGap { missing, max } => {
                write!(f, "label {} is absent but the highest label is {}", missing, max)
            }
        }
    }
}

/// A builder for [`Board`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some
/// point. Once any [`BuilderInvalidReason`] condition arises, subsequent mutating calls do
/// nothing and [`build`](Self::build) reports every accumulated reason.
#[derive(Clone)]
pub struct BoardBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    labels: Array2<Label>,
    invalid_reasons: Vec<BuilderInvalidReason>,
    walls: HashSet<UnorderedPair<Location>>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(6).unwrap(), NonZero::new(6).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            labels: Array2::from_elem((dims.0.get(), dims.1.get()), 0),
            invalid_reasons: Default::default(),
            walls: Default::default(),
        }
    }

    /// Construct a builder from a row-major matrix of labels, the canonical shape produced by
    /// the puzzle extractor. `0` cells are unlabeled.
    ///
    /// An empty or non-rectangular matrix puts the builder in an invalid state
    /// ([`EmptyGrid`](BuilderInvalidReason::EmptyGrid) /
    /// [`RaggedRow`](BuilderInvalidReason::RaggedRow)) rather than panicking.
    pub fn from_rows(rows: &[Vec<Label>]) -> Self {
        let (Some(height), Some(width)) = (
            NonZero::new(rows.len()),
            NonZero::new(rows.first().map_or(0, Vec::len)),
        ) else {
            let mut ret = Self::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
            ret.invalid_reasons.push(BuilderInvalidReason::EmptyGrid);
            return ret;
        };

        let mut ret = Self::with_dims((height, width));
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width.get() {
                ret.invalid_reasons.push(BuilderInvalidReason::RaggedRow {
                    row: r,
                    expected: width.get(),
                    found: row.len(),
                });
                return ret;
            }

            for (c, label) in row.iter().enumerate() {
                if *label > 0 {
                    ret.labels.index_mut((r, c)).assign_elem(*label);
                }
            }
        }

        ret
    }

    /// Place `label` on the cell at `location`.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if
    /// `location` is out of bounds. Label uniqueness and contiguity are checked once, at
    /// [`build`](Self::build) time.
    pub fn add_label(&mut self, label: Label, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.labels.index_mut(location.as_index()).assign_elem(label);
        self
    }

    /// Disconnect the two `locations`, i.e. place a wall between them.
    ///
    /// A wall prevents paths from crossing it. If the two locations are not adjacent, this
    /// function does nothing and does not invalidate the builder.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either
    /// location is out of bounds. If the builder is already in an invalid state, this function
    /// does nothing.
    pub fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if SquareStep::direction_to(locations.0, locations.1).is_none() {
            return self;
        }

        self.walls.insert(locations);

        self
    }

    /// Shorthand for multiple calls to [`Self::disconnect`], with the same conditions.
    ///
    /// Disconnects cells neighboring `location`. Any appearance of a direction after the first
    /// in `directions` is ignored.
    pub fn disconnect_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self {
        for direction in directions {
            self.disconnect(UnorderedPair::from((location, direction.attempt_from(location))));
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has
    /// arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn scan_labels(&mut self) -> Vec<Location> {
        let mut found: Vec<(Label, Location)> = self
            .labels
            .indexed_iter()
            .filter(|(_, label)| **label > 0)
            .map(|(ind, label)| (*label, Location::from(ind)))
            .collect();
        found.sort();

        for window in found.windows(2) {
            let ((l1, loc1), (l2, loc2)) = (window[0], window[1]);
            if l1 == l2 {
                self.invalid_reasons.push(BuilderInvalidReason::DuplicateLabel {
                    label: l1,
                    locations: UnorderedPair::from((loc1, loc2)),
                });
            }
        }

        if let Some((max, _)) = found.last() {
            if !self.invalid_reasons.is_empty() {
                return Vec::new();
            }

            // distinct and sorted, so contiguous iff the values are exactly 1..=max
            if found.len() != *max {
                let missing = found
                    .iter()
                    .map(|(label, _)| *label)
                    .zip(1..)
                    .find(|(label, expected)| label != expected)
                    .map_or(found.len() + 1, |(_, expected)| expected);
                self.invalid_reasons.push(BuilderInvalidReason::LabelGap { missing, max: *max });
                return Vec::new();
            }
        }

        found.into_iter().map(|(_, location)| location).collect()
    }

    /// Convert the state of this builder into a [`Board`].
    ///
    /// Label placement is validated here: every label value must be unique and the values
    /// present must form the contiguous set `1..=max`. A board with no labels at all is
    /// constructible; solving it reports a missing start label instead.
    ///
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`BuilderInvalidReason`] will indicate why.
    pub fn build(&mut self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let label_positions = self.scan_labels();
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let (rows, cols) = (self.dims.0.get(), self.dims.1.get());
        let mut graph = UnGraphMap::with_capacity(
            rows * cols,
            // "horizontal" edges plus "vertical" edges on a complete grid
            (cols - 1) * rows + (rows - 1) * cols,
        );

        for r in 0..rows {
            for c in 0..cols {
                let location = Location(r, c);
                graph.add_node(location);

                // add edges down and to the right, if possible and not walled off
                for direction in [SquareStep::Right, SquareStep::Down] {
                    let other = direction.attempt_from(location);
                    if other.0 < rows
                        && other.1 < cols
                        && !self.walls.contains(&UnorderedPair::from((location, other)))
                    {
                        graph.add_edge(location, other, ());
                    }
                }
            }
        }

        Ok(Board {
            labels: self.labels.clone(),
            dims: self.dims,
            label_positions,
            walls: self.walls.clone(),
            graph,
        })
    }
}
