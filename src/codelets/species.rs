//! Codelets for species.param and speciesDefinition.param.

pub(super) const NUMERICS: &[(&str, &str)] = &[(
    "default",
    r#"using UsedParticleShape${name} = particles::shapes::${ParticleShape};

using UsedField2Particle${name} = FieldToParticleInterpolation<
    UsedParticleShape${name},
    AssignedTrilinearInterpolation>;

using UsedParticleCurrentSolver${name} = currentSolver::${CurrentSolver}< UsedParticleShape${name} >;
using UsedParticlePusher${name} = particles::pusher::${ParticlePusher};"#,
)];

const IONIZABLE: &str = r#"value_identifier( float_X, MassRatio${name}, ${MassRatio} );
value_identifier( float_X, ChargeRatio${name}, ${ChargeRatio} );
value_identifier( float_X, DensityRatio${name}, ${DensityRatio} );

using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >,
    current< UsedParticleCurrentSolver${name} >,
    massRatio< MassRatio${name} >,
    chargeRatio< ChargeRatio${name} >,
    densityRatio< DensityRatio${name} >,
    ionizers<
        MakeSeq_t<
            particles::ionization::BSIEffectiveZ< PIC_${TargetSpeciesName} >,
            particles::ionization::ADK${IonizerPol}Pol< PIC_${TargetSpeciesName} >
        >
    >,
    ionizationEnergies< ionization::energies::AU::${Element}_t >,
    effectiveNuclearCharge< ionization::effectiveNuclearCharge::${Element}_t >,
    atomicNumbers< ionization::atomicNumbers::${Element}_t >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    IonParticleAttributes
>;"#;

pub(super) const DEFINITIONS: &[(&str, &str)] = &[
    (
        "electron",
        r#"value_identifier( float_X, MassRatio${name}, 1.0 );
value_identifier( float_X, ChargeRatio${name}, 1.0 );
value_identifier( float_X, DensityRatio${name}, ${DensityRatio} );

using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >,
    current< UsedParticleCurrentSolver${name} >,
    massRatio< MassRatio${name} >,
    chargeRatio< ChargeRatio${name} >,
    densityRatio< DensityRatio${name} >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    DefaultParticleAttributes
>;"#,
    ),
    (
        "proton",
        r#"value_identifier( float_X, MassRatio${name}, 1836.152672 );
value_identifier( float_X, ChargeRatio${name}, -1.0 );
value_identifier( float_X, DensityRatio${name}, ${DensityRatio} );

using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >,
    current< UsedParticleCurrentSolver${name} >,
    massRatio< MassRatio${name} >,
    chargeRatio< ChargeRatio${name} >,
    densityRatio< DensityRatio${name} >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    DefaultParticleAttributes
>;"#,
    ),
    ("ion", IONIZABLE),
    ("generic_ionizable", IONIZABLE),
    (
        "generic_nonionizable",
        r#"value_identifier( float_X, MassRatio${name}, ${MassRatio} );
value_identifier( float_X, ChargeRatio${name}, ${ChargeRatio} );
value_identifier( float_X, DensityRatio${name}, ${DensityRatio} );

using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >,
    current< UsedParticleCurrentSolver${name} >,
    massRatio< MassRatio${name} >,
    chargeRatio< ChargeRatio${name} >,
    densityRatio< DensityRatio${name} >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    DefaultParticleAttributes
>;"#,
    ),
    (
        "photon",
        r#"value_identifier( float_X, MassRatio${name}, 0.0 );
value_identifier( float_X, ChargeRatio${name}, 0.0 );

using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >,
    massRatio< MassRatio${name} >,
    chargeRatio< ChargeRatio${name} >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    DefaultParticleAttributes
>;"#,
    ),
    (
        "probe",
        r#"using ParticleFlags${name} = MakeSeq_t<
    particlePusher< UsedParticlePusher${name} >,
    shape< UsedParticleShape${name} >,
    interpolation< UsedField2Particle${name} >
>;

using PIC_${name} = Particles<
    PMACC_CSTRING( "${name}" ),
    ParticleFlags${name},
    MakeSeq_t< position< position_pic >, probeB, probeE >
>;"#,
    ),
];
