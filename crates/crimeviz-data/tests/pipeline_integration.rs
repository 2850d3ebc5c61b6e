//! End-to-end tests covering CSV loading through aggregation

use crimeviz_data::{
    dense_hourly_counts, dense_monthly_counts, heat_frames, load_incidents,
    monthly_category_series, top_categories,
};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "Incident Date,Incident Time,Incident Category,Latitude,Longitude,Year";

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_csv_to_trends_series() {
    let file = write_csv(&[
        "2018/01/05,10:00,Motor Vehicle Theft,37.77,-122.42,2018",
        "2018/01/20,11:00,Motor Vehicle Theft,37.78,-122.41,2018",
        "2018/02/01,12:00,Motor Vehicle Theft,,,2018",
        "2018/01/10,13:00,Assault,37.76,-122.43,2018",
    ]);

    let incidents = load_incidents(file.path()).unwrap();
    let categories = top_categories(&incidents, 2);
    assert_eq!(categories[0], "Motor Vehicle Theft");

    let series = monthly_category_series(&incidents, &categories);
    assert_eq!(series.len(), 2);

    let theft = &series[0];
    assert_eq!(theft.name, "Motor Vehicle Theft");
    // Two January records collapse into one month point
    assert_eq!(theft.points.len(), 2);
    assert_eq!(theft.points[0].1, 2);
    assert_eq!(theft.points[1].1, 1);
}

#[test]
fn test_csv_to_dense_grids() {
    let file = write_csv(&[
        "2003/06/01,14:30,Motor Vehicle Theft,37.77,-122.42,2003",
        "2003/06/15,14:45,Motor Vehicle Theft,37.78,-122.41,2003",
        "2004/01/01,noon,Motor Vehicle Theft,,,2004",
    ]);

    let incidents = load_incidents(file.path()).unwrap();

    let cells = dense_monthly_counts(&incidents, "motor vehicle theft", 2003, 2004);
    assert_eq!(cells.len(), 24);
    assert_eq!(
        cells
            .iter()
            .find(|c| c.year == 2003 && c.month == 6)
            .unwrap()
            .count,
        2
    );
    // Months with no data are present and zero
    assert_eq!(
        cells
            .iter()
            .find(|c| c.year == 2004 && c.month == 6)
            .unwrap()
            .count,
        0
    );

    let years = dense_hourly_counts(&incidents, "motor vehicle theft", 2003, 2004).unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].counts[14], 2);
    // The colon-free time lands in hour 0
    assert_eq!(years[1].counts[0], 1);
}

#[test]
fn test_csv_to_heat_frames() {
    let file = write_csv(&[
        "2003/01/01,10:00,Motor Vehicle Theft,37.77,-122.42,2003",
        // Outside the bounding box
        "2003/01/02,10:00,Motor Vehicle Theft,41.00,-122.42,2003",
        // No coordinates
        "2003/01/03,10:00,Motor Vehicle Theft,,,2003",
        "2005/01/01,10:00,Motor Vehicle Theft,37.76,-122.43,2005",
    ]);

    let incidents = load_incidents(file.path()).unwrap();
    let frames = heat_frames(&incidents, Some("motor vehicle theft"), 2003, 2005);

    assert_eq!(frames.labels, vec!["2003", "2004", "2005"]);
    assert_eq!(frames.frames[0], vec![(37.77, -122.42)]);
    assert!(frames.frames[1].is_empty());
    assert_eq!(frames.frames[2].len(), 1);
}
