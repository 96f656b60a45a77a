use super::config::validate_timestep;
use super::error::ConfigError;
use crate::units::*;

// All timing values in seconds
pub struct TimeManager {
    passed_time: Real,
    timestep: Real,
}

impl TimeManager {
    pub fn new(timestep: Real) -> Result<TimeManager, ConfigError> {
        validate_timestep(timestep)?;
        Ok(TimeManager { passed_time: 0.0, timestep })
    }

    pub fn restart(&mut self) {
        self.passed_time = 0.0;
    }

    // how much physical time has passed in the simulation
    pub fn passed_time(&self) -> Real {
        self.passed_time
    }

    // how long the next timestep is going to be
    pub fn timestep(&self) -> Real {
        self.timestep
    }

    pub fn set_timestep(&mut self, timestep: Real) -> Result<(), ConfigError> {
        validate_timestep(timestep)?;
        self.timestep = timestep;
        Ok(())
    }

    // updates time with the current timestep
    pub(super) fn update_time(&mut self) {
        self.passed_time += self.timestep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_time() {
        let mut time_manager = TimeManager::new(0.01).unwrap();
        time_manager.update_time();
        time_manager.update_time();
        time_manager.set_timestep(0.5).unwrap();
        time_manager.update_time();
        assert!((time_manager.passed_time() - 0.52).abs() < 1.0e-6);

        time_manager.restart();
        assert_eq!(time_manager.passed_time(), 0.0);
        assert_eq!(time_manager.timestep(), 0.5);
    }

    #[test]
    fn rejects_invalid_timestep() {
        assert!(TimeManager::new(0.0).is_err());
        let mut time_manager = TimeManager::new(0.01).unwrap();
        assert_eq!(time_manager.set_timestep(-1.0), Err(ConfigError::NonPositiveTimestep(-1.0)));
        assert_eq!(time_manager.set_timestep(Real::INFINITY), Err(ConfigError::NonPositiveTimestep(Real::INFINITY)));
        assert_eq!(time_manager.timestep(), 0.01);
    }
}
