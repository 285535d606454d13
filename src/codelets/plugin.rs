//! Diagnostic plugin invocations for run.cfg.

pub(super) const PLUGINS: &[(&str, &str)] = &[
    (
        "openPMD",
        r#"TBG_${name}_${period}="--openPMD.period ${period} --openPMD.file ${name} --openPMD.source '${source}' --openPMD.ext h5""#,
    ),
    (
        "hdf5",
        r#"TBG_${name}_${period}="--hdf5.period ${period} --hdf5.file ${name} --hdf5.source '${source}'""#,
    ),
];
