use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationType {
    Simple,
    SweepBurnFraction,
    SweepInflowRate,
    CompareDemand,
    RunAll,
    Exit,
}

impl SimulationType {
    /// Accepts a menu number or a scenario name
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" | "simple" => Some(SimulationType::Simple),
            "2" | "sweep_burn_fraction" => Some(SimulationType::SweepBurnFraction),
            "3" | "sweep_inflow_rate" => Some(SimulationType::SweepInflowRate),
            "4" | "compare_demand" => Some(SimulationType::CompareDemand),
            "5" | "all" => Some(SimulationType::RunAll),
            "0" | "exit" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

pub struct SimulatorInterface;

impl Default for SimulatorInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorInterface {
    pub fn new() -> Self {
        Self
    }

    pub fn get_menu_text(&self) -> &'static str {
        "Available simulation types:\n  1. Simple simulation (simple)\n  2. Sweep burn fraction (sweep_burn_fraction)\n  3. Sweep provider inflow rate (sweep_inflow_rate)\n  4. Compare demand scenarios (compare_demand)\n  5. Run all (all)\n  0. Exit"
    }

    pub fn show_menu(&self) {
        println!("=== DePIN Token Economy Simulator ===");
        println!("{}", self.get_menu_text());
    }

    /// Prompts on stdin; `None` when the answer is not a known choice
    pub fn get_user_choice(&self) -> io::Result<Option<SimulationType>> {
        print!("\nSelect simulation type (0-5): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(SimulationType::from_input(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_names_select_the_same_simulation() {
        assert_eq!(SimulationType::from_input("2"), SimulationType::from_input("sweep_burn_fraction"));
        assert_eq!(SimulationType::from_input(" 4\n"), Some(SimulationType::CompareDemand));
        assert_eq!(SimulationType::from_input("0"), Some(SimulationType::Exit));
        assert_eq!(SimulationType::from_input("9"), None);
    }
}
