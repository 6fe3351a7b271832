//! AC sweep parameters and frequency-grid generation.

use std::f64::consts::PI;

/// AC sweep spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSweepType {
    /// Linear frequency spacing.
    Linear,
    /// Logarithmic spacing, points per decade.
    Decade,
    /// Logarithmic spacing, points per octave.
    Octave,
}

/// AC analysis parameters.
#[derive(Debug, Clone)]
pub struct AcParams {
    /// Start frequency (Hz).
    pub fstart: f64,
    /// Stop frequency (Hz).
    pub fstop: f64,
    /// Number of points (total for Linear, per decade/octave otherwise).
    pub num_points: usize,
    /// Sweep spacing.
    pub sweep_type: AcSweepType,
}

/// Angular frequency for a frequency in Hz.
pub fn angular_frequency(frequency: f64) -> f64 {
    2.0 * PI * frequency
}

/// Generate the frequency grid for an AC sweep, in Hz.
pub fn generate_frequencies(params: &AcParams) -> Vec<f64> {
    match params.sweep_type {
        AcSweepType::Linear => {
            if params.num_points <= 1 {
                return vec![params.fstart];
            }
            let step = (params.fstop - params.fstart) / (params.num_points as f64 - 1.0);
            (0..params.num_points)
                .map(|i| params.fstart + step * i as f64)
                .collect()
        }
        AcSweepType::Decade => {
            let decades = (params.fstop / params.fstart).log10();
            let total = (params.num_points as f64 * decades).ceil() as usize + 1;
            (0..total)
                .map(|i| params.fstart * 10.0_f64.powf(i as f64 / params.num_points as f64))
                .filter(|&f| f <= params.fstop * 1.001)
                .collect()
        }
        AcSweepType::Octave => {
            let octaves = (params.fstop / params.fstart).log2();
            let total = (params.num_points as f64 * octaves).ceil() as usize + 1;
            (0..total)
                .map(|i| params.fstart * 2.0_f64.powf(i as f64 / params.num_points as f64))
                .filter(|&f| f <= params.fstop * 1.001)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_grid() {
        let params = AcParams {
            fstart: 1.0,
            fstop: 100.0,
            num_points: 100,
            sweep_type: AcSweepType::Linear,
        };
        let freqs = generate_frequencies(&params);

        assert_eq!(freqs.len(), 100);
        assert!((freqs[0] - 1.0).abs() < 1e-10);
        assert!((freqs[99] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_decade_grid() {
        let params = AcParams {
            fstart: 1.0,
            fstop: 1000.0,
            num_points: 10,
            sweep_type: AcSweepType::Decade,
        };
        let freqs = generate_frequencies(&params);

        // 3 decades at 10 points per decade, endpoints included.
        assert_eq!(freqs.len(), 31);
        assert!((freqs[10] - 10.0).abs() < 1e-6);
        assert!((freqs[20] - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_octave_grid() {
        let params = AcParams {
            fstart: 100.0,
            fstop: 1600.0,
            num_points: 5,
            sweep_type: AcSweepType::Octave,
        };
        let freqs = generate_frequencies(&params);

        // 4 octaves at 5 points per octave.
        assert_eq!(freqs.len(), 21);
        assert!((freqs[5] - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_grid_is_reproducible() {
        let params = AcParams {
            fstart: 20.0,
            fstop: 20e3,
            num_points: 25,
            sweep_type: AcSweepType::Decade,
        };
        assert_eq!(generate_frequencies(&params), generate_frequencies(&params));
    }

    #[test]
    fn test_angular_frequency() {
        assert!((angular_frequency(1.0) - 2.0 * PI).abs() < 1e-15);
    }
}
