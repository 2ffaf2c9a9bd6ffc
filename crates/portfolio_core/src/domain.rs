/// One row of the course-grade table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub grade: String,
    pub ects: String,
    pub semester: String,
}

impl Course {
    /// ECTS points as a number, `None` when the cell is blank or not numeric.
    pub fn ects_points(&self) -> Option<f64> {
        self.ects.trim().replace(',', ".").parse().ok()
    }

    /// Cells in display order.
    pub fn cells(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.as_str()),
            ("grade", self.grade.as_str()),
            ("ects", self.ects.as_str()),
            ("semester", self.semester.as_str()),
        ]
    }
}

/// One project as parsed from the project table, with paths already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub category: String,
    pub date: String,
    pub text: String,
    pub image: String,
    pub icon: Option<String>,
    pub link: Option<String>,
}
