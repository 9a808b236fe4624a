// ADSR envelope - amplitude shaping for voices
//
// Linear attack/decay/release segments with a held sustain level.
// Processed once per sample on the audio thread.

/// ADSR parameters in seconds (times) and 0..=1 (sustain level).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrParams {
    /// Create parameters, clamped to usable ranges.
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.clamp(0.001, 5.0),
            decay: decay.clamp(0.001, 5.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.clamp(0.001, 5.0),
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        // Soft piano-like patch: quick attack, long decay to a low sustain
        Self {
            attack: 0.05,
            decay: 1.0,
            sustain: 0.1,
            release: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Per-voice envelope generator.
#[derive(Clone)]
pub struct AdsrEnvelope {
    params: AdsrParams,
    stage: EnvelopeStage,
    level: f32,
    sample_rate: f32,
    /// Level at the start of the current stage, for linear interpolation
    stage_start_level: f32,
    /// Samples elapsed in the current stage
    stage_samples: f32,
}

impl AdsrEnvelope {
    pub fn new(params: AdsrParams, sample_rate: f32) -> Self {
        Self {
            params,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            sample_rate,
            stage_start_level: 0.0,
            stage_samples: 0.0,
        }
    }

    pub fn set_params(&mut self, params: AdsrParams) {
        self.params = params;
    }

    pub fn params(&self) -> AdsrParams {
        self.params
    }

    /// Enter the attack stage. Retriggering ramps up from the current
    /// level, so restarting a releasing voice does not click.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.stage_start_level = self.level;
        self.stage_samples = 0.0;
    }

    /// Enter the release stage from wherever the envelope currently is.
    pub fn note_off(&mut self) {
        if self.stage != EnvelopeStage::Idle {
            self.stage = EnvelopeStage::Release;
            self.stage_start_level = self.level;
            self.stage_samples = 0.0;
        }
    }

    fn enter(&mut self, stage: EnvelopeStage, level: f32) {
        self.stage = stage;
        self.stage_start_level = level;
        self.level = level;
        self.stage_samples = 0.0;
    }

    /// Advance one sample and return the amplitude in [0, 1].
    pub fn process(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }
            EnvelopeStage::Attack => {
                let attack_samples = self.params.attack * self.sample_rate;
                let progress = (self.stage_samples / attack_samples).min(1.0);
                self.level = self.stage_start_level + (1.0 - self.stage_start_level) * progress;
                self.stage_samples += 1.0;
                if progress >= 1.0 {
                    self.enter(EnvelopeStage::Decay, 1.0);
                }
            }
            EnvelopeStage::Decay => {
                let decay_samples = self.params.decay * self.sample_rate;
                let progress = (self.stage_samples / decay_samples).min(1.0);
                self.level = 1.0 - progress * (1.0 - self.params.sustain);
                self.stage_samples += 1.0;
                if progress >= 1.0 {
                    self.enter(EnvelopeStage::Sustain, self.params.sustain);
                }
            }
            EnvelopeStage::Sustain => {
                self.level = self.params.sustain;
            }
            EnvelopeStage::Release => {
                let release_samples = self.params.release * self.sample_rate;
                let progress = (self.stage_samples / release_samples).min(1.0);
                self.level = self.stage_start_level * (1.0 - progress);
                self.stage_samples += 1.0;
                if progress >= 1.0 {
                    self.enter(EnvelopeStage::Idle, 0.0);
                }
            }
        }

        self.level
    }

    /// Active from the first attack sample until release completes.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.enter(EnvelopeStage::Idle, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SAMPLE_RATE: f32 = 48000.0;

    #[test]
    fn test_default_params_follow_patch() {
        let params = AdsrParams::default();
        assert_eq!(params.attack, 0.05);
        assert_eq!(params.decay, 1.0);
        assert_eq!(params.sustain, 0.1);
        assert_eq!(params.release, 1.0);
    }

    #[test]
    fn test_params_clamping() {
        let params = AdsrParams::new(-1.0, 10.0, 1.5, 0.0);
        assert!(params.attack >= 0.001);
        assert!(params.decay <= 5.0);
        assert!(params.sustain <= 1.0);
        assert!(params.release >= 0.001);
    }

    #[test]
    fn test_starts_idle() {
        let env = AdsrEnvelope::new(AdsrParams::default(), TEST_SAMPLE_RATE);
        assert!(!env.is_active());
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_attack_reaches_peak() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.01, 0.1, 0.5, 0.2), TEST_SAMPLE_RATE);
        env.note_on();

        let attack_samples = (0.01 * TEST_SAMPLE_RATE) as usize;
        let mut peak: f32 = 0.0;
        for _ in 0..attack_samples + 10 {
            peak = peak.max(env.process());
        }
        assert!((peak - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_decay_settles_on_sustain() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.001, 0.01, 0.5, 0.1), TEST_SAMPLE_RATE);
        env.note_on();

        let settle = ((0.001 + 0.01) * TEST_SAMPLE_RATE) as usize + 100;
        for _ in 0..settle {
            env.process();
        }
        assert!((env.level() - 0.5).abs() < 0.01);

        // Sustain holds indefinitely
        for _ in 0..10000 {
            env.process();
        }
        assert!((env.level() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_release_fades_to_idle() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.001, 0.001, 0.5, 0.01), TEST_SAMPLE_RATE);
        env.note_on();
        for _ in 0..1000 {
            env.process();
        }

        env.note_off();
        let release_samples = (0.01 * TEST_SAMPLE_RATE) as usize;
        for _ in 0..release_samples + 100 {
            env.process();
        }

        assert!(!env.is_active());
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_note_off_during_attack_releases() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.1, 0.1, 0.5, 0.001), TEST_SAMPLE_RATE);
        env.note_on();
        for _ in 0..100 {
            env.process();
        }

        env.note_off();
        for _ in 0..1000 {
            env.process();
        }
        assert!(!env.is_active());
    }

    #[test]
    fn test_retrigger_ramps_from_current_level() {
        let mut env = AdsrEnvelope::new(AdsrParams::new(0.01, 0.01, 0.8, 0.1), TEST_SAMPLE_RATE);
        env.note_on();
        for _ in 0..2000 {
            env.process();
        }
        let before = env.level();
        assert!(before > 0.0);

        // Retrigger must not snap the level back to zero
        env.note_on();
        let first = env.process();
        assert!(first >= before - 0.01);
    }

    #[test]
    fn test_note_off_while_idle_stays_idle() {
        let mut env = AdsrEnvelope::new(AdsrParams::default(), TEST_SAMPLE_RATE);
        env.note_off();
        assert!(!env.is_active());
        assert_eq!(env.process(), 0.0);
    }
}
