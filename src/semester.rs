use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::module::Module;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub number: u32,
    pub modules: Vec<Module>,
}

impl Semester {
    pub fn new(number: u32, modules: Vec<Module>) -> Self {
        Self { number, modules }
    }

    /// Every entered grade, in module order.
    pub fn grades(&self) -> Vec<f64> {
        self.modules.iter().filter_map(Module::grade).collect()
    }

    pub fn passed_count(&self) -> usize {
        self.modules.iter().filter(|m| m.exam.is_passed()).count()
    }

    pub fn recognized_count(&self) -> usize {
        self.modules.iter().filter(|m| m.exam.is_recognized()).count()
    }

    pub fn earned_credits(&self) -> u32 {
        self.modules
            .iter()
            .filter(|m| m.is_complete())
            .map(|m| m.credits)
            .sum()
    }

    pub fn total_credits(&self) -> u32 {
        self.modules.iter().map(|m| m.credits).sum()
    }
}

/// Collects modules under their semester number and returns the semesters
/// sorted ascending. Modules keep the order in which they were pushed.
#[derive(Debug, Default)]
pub struct SemesterGrouping {
    groups: BTreeMap<u32, Vec<Module>>,
}

impl SemesterGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, semester: u32, module: Module) {
        self.groups.entry(semester).or_default().push(module);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_semesters(self) -> Vec<Semester> {
        self.groups
            .into_iter()
            .map(|(number, modules)| Semester::new(number, modules))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::ExamResult;

    #[test]
    fn grouping_sorts_semesters_and_keeps_module_order() {
        let mut grouping = SemesterGrouping::new();
        grouping.push(3, Module::new("C", 5, ExamResult::new("Klausur")));
        grouping.push(1, Module::new("A", 5, ExamResult::new("Klausur")));
        grouping.push(3, Module::new("D", 5, ExamResult::new("Klausur")));

        let semesters = grouping.into_semesters();
        let numbers: Vec<u32> = semesters.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        let titles: Vec<&str> = semesters[1].modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "D"]);
    }
}
