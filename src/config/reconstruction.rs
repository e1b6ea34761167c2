//! Configuration file parser for iterative reconstruction

use std::fs;
use std::str::FromStr;
use std::path::Path;

use serde::{Deserialize, Deserializer, de};

use units::{Length, mm};

use crate::{Error, Result, Point, Volume, Lengthf32, Ratiof32};
use crate::utils::to_array;

fn deserialize_uom<'d, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    <&str>::deserialize(deserializer)?
        .parse::<T>()
        .map_err(de::Error::custom)
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sirt,
    Sart,
    Art,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Number of iterations to perform
    pub iterations: usize,

    #[serde(default)]
    pub algorithm: Algorithm,

    /// Relaxation factor λ applied to every update
    #[serde(default = "default_relaxation")]
    pub relaxation: Ratiof32,

    /// Number of voxels along each axis: its length sets the dimension
    pub nvoxels: Vec<usize>,

    /// Corner of the volume, in voxel units. Centred on zero when absent.
    #[serde(default)]
    pub origin: Option<Vec<Lengthf32>>,

    #[serde(default = "default_voxel_size")]
    #[serde(deserialize_with = "deserialize_uom")]
    pub voxel_size: Length,

    /// Number of rays per parallel job
    #[serde(default = "default_job_size")]
    pub job_size: usize,

    /// Number of interleaved ray subsets updated in turn by SART
    #[serde(default = "default_subsets")]
    pub subsets: usize,
}

fn default_relaxation() -> Ratiof32 { 1.0 }
fn default_voxel_size() -> Length { mm(1.0) }
fn default_job_size() -> usize { 1000 }
fn default_subsets() -> usize { 1 }

impl Config {

    pub fn dimension(&self) -> usize { self.nvoxels.len() }

    /// The volume described by `nvoxels` and `origin`, which must both have
    /// `D` components
    pub fn volume<const D: usize>(&self) -> Result<Volume<D>> {
        let lengths = to_array::<usize, D>(&self.nvoxels)?;
        match &self.origin {
            Some(origin) => Volume::new(Point::new(to_array(origin)?), lengths),
            None         => Volume::centred(lengths),
        }
    }

    fn validate(self) -> Result<Self> {
        if !(1..=3).contains(&self.dimension()) {
            return Err(Error::Config(format!("nvoxels must have 1 to 3 components, got {}", self.dimension())))
        }
        if !(self.relaxation.is_finite() && self.relaxation > 0.0) {
            return Err(Error::Config(format!("relaxation must be positive, got {}", self.relaxation)))
        }
        if self.subsets == 0 {
            return Err(Error::Config("subsets must be at least 1".into()))
        }
        if !(self.voxel_size.value.is_finite() && self.voxel_size.value > 0.0) {
            return Err(Error::Config(format!("voxel_size must be positive, got {:?}", self.voxel_size)))
        }
        Ok(self)
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let config: String = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config)?;
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use units::cm;

    // ----- Test an example on-disk config file -----------------------------------------
    #[test]
    fn test_config_file() -> Result<()> {
        let config = read_config_file("reconstruct-config.toml".as_ref())?;
        assert_eq!(config.iterations, 10);
        assert_eq!(config.algorithm, Algorithm::Sirt);
        assert_eq!(config.relaxation, 0.8);
        assert_eq!(config.nvoxels, vec![64, 64]);
        assert_eq!(config.voxel_size, mm(2.0));
        Ok(())
    }

    // ----- Some helpers to make the tests more concise ---------------------------------
    //  ---  Parse string as TOML  -------------------------
    fn parse<'d, D: Deserialize<'d>>(input: &'d str) -> D {
        toml::from_str(input).unwrap()
    }
    //  ---  Parse string as TOML, with explicit error reporting -------------------------
    fn parse_carefully<'d, D: Deserialize<'d>>(input: &'d str) -> std::result::Result<D, toml::de::Error> {
        toml::from_str(input)
    }
    //  ---  Macro for concise assertions about vlues of parsed fields -------------------
    macro_rules! check {
        ($type:ident($text:expr).$field:ident = $expected:expr) => {
            let config: $type = parse::<$type>($text);
            println!("DESERIALIZED: {config:?}");
            assert_eq!(config.$field, $expected);
        };
        ($type:ident($text:expr) fields: $($field:ident = $expected:expr);+$(;)?) => {
            let config: $type = parse::<$type>($text);
            println!("DESERIALIZED: {config:?}");
            $(assert_eq!(config.$field, $expected);)*
        }
    }
    // ----- Test deserializing of individual aspects of the Config type ----------------
    #[test]
    fn config_defaults() {
        check!{Config(r#"
                 iterations = 50
                 nvoxels = [4, 5]
               "#) fields:
               iterations = 50;
               algorithm  = Algorithm::Sirt;
               relaxation = 1.0;
               origin     = None;
               voxel_size = mm(1.0);
               job_size   = 1000;
               subsets    = 1
        }
    }

    #[test]
    fn config_everything() {
        check!{Config(r#"
                 iterations = 3
                 algorithm = "art"
                 relaxation = 0.25
                 nvoxels = [10, 20, 30]
                 origin = [-5.0, 0.0, 2.5]
                 voxel_size = "1.5 cm"
                 job_size = 7
               "#) fields:
               iterations = 3;
               algorithm  = Algorithm::Art;
               relaxation = 0.25;
               nvoxels    = vec![10, 20, 30];
               origin     = Some(vec![-5.0, 0.0, 2.5]);
               voxel_size = cm(1.5);
               job_size   = 7
        }
    }

    #[test]
    fn config_sart() {
        check!{Config(r#"
                 iterations = 3
                 algorithm = "sart"
                 nvoxels = [10, 20]
                 subsets = 6
               "#) fields:
               algorithm  = Algorithm::Sart;
               subsets    = 6
        }
    }
    // ----- Make sure that unknown fields are not accepted -----------------------------
    #[test]
    #[should_panic]
    fn config_reject_unknown_field() {
        parse::<Config>("iterations = 1\nnvoxels = [2]\nunknown_field = 666");
    }

    #[test]
    fn config_requires_iterations_and_nvoxels() {
        assert!(parse_carefully::<Config>("nvoxels = [2]").is_err());
        assert!(parse_carefully::<Config>("iterations = 2").is_err());
        assert!(parse_carefully::<Config>(r#"iterations = 2
                                             nvoxels = [2]
                                             algorithm = "mlem""#).is_err());
        assert!(parse_carefully::<Config>(r#"iterations = 2
                                             nvoxels = [2]
                                             voxel_size = "2 kg""#).is_err());
        assert!(parse_carefully::<Config>(r#"iterations = 2
                                             nvoxels = [2]
                                             voxel_size = "two mm""#).is_err());
    }

    #[test]
    fn config_validation() {
        let bad = [
            "iterations = 1\nnvoxels = []",
            "iterations = 1\nnvoxels = [1, 2, 3, 4]",
            "iterations = 1\nnvoxels = [4]\nrelaxation = 0.0",
            "iterations = 1\nnvoxels = [4]\nsubsets = 0",
            "iterations = 1\nnvoxels = [4]\nvoxel_size = \"-1 mm\"",
        ];
        for text in bad {
            let config: Config = parse(text);
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{text}");
        }
    }

    // ----- The volume described by the configuration ---------------------------------
    #[test]
    fn config_volume() -> Result<()> {
        let config: Config = parse("iterations = 1\nnvoxels = [4, 6]");
        let volume = config.volume::<2>()?;
        assert_eq!(volume.lengths(), [4, 6]);
        assert_eq!(volume.origin(), Point::new([-2.0, -3.0]));

        let config: Config = parse("iterations = 1\nnvoxels = [4, 6]\norigin = [1.0, 2.0]");
        assert_eq!(config.volume::<2>()?.origin(), Point::new([1.0, 2.0]));

        assert!(matches!(config.volume::<3>(), Err(Error::Dimension { expected: 3, got: 2 })));
        Ok(())
    }

    // uom quantities must carry their units, so they are given as strings in
    // TOML and parsed with uom's own parser
    #[test]
    fn uom_parse() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let l: Length = "2 mm".parse()?;
        assert_eq!(l, mm(2.));

        let l: Length = "2 cm".parse()?;
        assert_eq!(l, cm(2.));
        Ok(())
    }
}
