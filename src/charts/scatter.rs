use crate::data::model::{Attribute, Island, Sex, Species};
use crate::data::view::ViewRows;

/// One plotted observation; `island` is carried for the hover annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub island: Island,
}

/// Points sharing a colour (species) and marker (sex).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub sex: Option<Sex>,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    /// Legend label, e.g. `Adelie, male`.
    pub fn name(&self) -> String {
        match self.sex {
            Some(sex) => format!("{}, {sex}", self.species),
            None => format!("{}, unknown", self.species),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub x: Attribute,
    pub y: Attribute,
    pub series: Vec<ScatterSeries>,
}

impl ScatterPlot {
    /// Group the rows by (species, sex), skipping rows missing either axis.
    pub fn compute(rows: ViewRows<'_>, x: Attribute, y: Attribute) -> Self {
        let mut series: Vec<ScatterSeries> = Vec::new();

        for r in rows.iter() {
            let (Some(px), Some(py)) = (r.value(x), r.value(y)) else {
                continue;
            };
            let point = ScatterPoint {
                x: px,
                y: py,
                island: r.island,
            };
            match series
                .iter_mut()
                .find(|s| s.species == r.species && s.sex == r.sex)
            {
                Some(s) => s.points.push(point),
                None => series.push(ScatterSeries {
                    species: r.species,
                    sex: r.sex,
                    points: vec![point],
                }),
            }
        }

        series.sort_by_key(|s| (s.species, s.sex.is_none(), s.sex));
        ScatterPlot { x, y, series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Hover text for the point of series `name` nearest to (`x`, `y`).
    pub fn hover_text(&self, name: &str, x: f64, y: f64) -> Option<String> {
        let series = self.series.iter().find(|s| s.name() == name)?;
        let point = series.points.iter().min_by(|a, b| {
            let da = (a.x - x).powi(2) + (a.y - y).powi(2);
            let db = (b.x - x).powi(2) + (b.y - y).powi(2);
            da.total_cmp(&db)
        })?;
        Some(format!(
            "{name}\n{}={}\n{}={}\nisland={}",
            self.x, point.x, self.y, point.y, point.island
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::SpeciesFilter;
    use crate::data::loader;
    use crate::data::model::{Dataset, Record};
    use crate::data::view::DerivedView;

    fn penguin(species: Species, island: Island, sex: Option<Sex>, mass: Option<f64>) -> Record {
        Record {
            species,
            island,
            bill_length_mm: Some(40.0),
            bill_depth_mm: Some(18.0),
            flipper_length_mm: Some(190.0),
            body_mass_g: mass,
            sex,
            year: 2009,
        }
    }

    fn sample_view() -> DerivedView {
        let ds = Dataset::from_records(vec![
            penguin(Species::Gentoo, Island::Biscoe, Some(Sex::Female), Some(5000.0)),
            penguin(Species::Adelie, Island::Dream, Some(Sex::Male), Some(3900.0)),
            penguin(Species::Adelie, Island::Torgersen, None, Some(3300.0)),
            penguin(Species::Adelie, Island::Biscoe, Some(Sex::Male), None),
            penguin(Species::Adelie, Island::Torgersen, Some(Sex::Male), Some(4100.0)),
        ]);
        DerivedView::new(Arc::new(ds), SpeciesFilter::default())
    }

    #[test]
    fn groups_by_species_and_sex() {
        let view = sample_view();
        let plot = ScatterPlot::compute(view.rows(), Attribute::FlipperLengthMm, Attribute::BodyMassG);

        let names: Vec<String> = plot.series.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Adelie, male", "Adelie, unknown", "Gentoo, female"]);
        assert_eq!(plot.series[0].points.len(), 2);
        assert_eq!(plot.point_count(), 4, "row missing y is skipped");
    }

    #[test]
    fn hover_reports_island_of_nearest_point() {
        let view = sample_view();
        let plot = ScatterPlot::compute(view.rows(), Attribute::FlipperLengthMm, Attribute::BodyMassG);

        let text = plot.hover_text("Adelie, male", 190.0, 4090.0).unwrap();
        assert!(text.contains("island=Torgersen"), "{text}");
        assert!(text.contains("body_mass_g=4100"), "{text}");
        assert!(plot.hover_text("Chinstrap, male", 0.0, 0.0).is_none());
    }

    #[test]
    fn empty_view_gives_empty_plot() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::none());
        let plot = ScatterPlot::compute(view.rows(), Attribute::BillLengthMm, Attribute::BodyMassG);
        assert!(plot.is_empty());
    }

    #[test]
    fn bundled_points_cover_rows_with_both_values() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::default());
        let rows = view.rows();
        let plot = ScatterPlot::compute(rows, Attribute::BillLengthMm, Attribute::BillDepthMm);
        let expected = rows
            .iter()
            .filter(|r| r.bill_length_mm.is_some() && r.bill_depth_mm.is_some())
            .count();
        assert_eq!(plot.point_count(), expected);
    }
}
