//! Codelets for particle.param and speciesInitialization.param.

pub(super) const START_POSITIONS: &[(&str, &str)] = &[
    (
        "Random",
        r#"    struct RandomParameter${name}
    {
        static constexpr uint32_t numParticlesPerCell = ${Nppc};
    };
    using startPosition${name} = RandomImpl< RandomParameter${name} >;"#,
    ),
    (
        "Ordered",
        r#"    struct QuietParam${name}
    {
        using numParticlesPerDimension = mCT::shrinkTo<
            mCT::Int<
                ${NppcX},
                ${NppcY},
                ${NppcZ}
            >,
            simDim
        >::type;
    };
    using startPosition${name} = QuietImpl< QuietParam${name} >;"#,
    ),
    (
        "OnePosition",
        r#"    CONST_VECTOR(float_X, 3, InCellOffset${name}, ${OffsetX}, ${OffsetY}, ${OffsetZ});
    struct OnePositionParameter${name}
    {
        static constexpr uint32_t numParticlesPerCell = ${Nppc};
        const InCellOffset${name}_t inCellOffset;
    };
    using startPosition${name} = OnePositionImpl< OnePositionParameter${name} >;"#,
    ),
];

pub(super) const MANIPULATORS: &[(&str, &str)] = &[
    (
        "Temperature",
        r#"    struct TemperatureParam${name}
    {
        static constexpr float_64 temperature = ${Temperature};
    };
    using AddTemperature${name} = unary::Temperature< TemperatureParam${name} >;"#,
    ),
    (
        "SetIonCharge",
        r#"    struct SetIonChargeParam${name}
    {
        template< typename T_Particle >
        DINLINE void operator()( T_Particle& particle )
        {
            particle[ boundElectrons_ ] = float_X( ${ProtonNumber} ) - float_X( ${InitialCharge} );
        }
        static constexpr char const* name = "SetIonCharge${name}";
    };
    using SetIonCharge${name} = generic::Free< SetIonChargeParam${name} >;"#,
    ),
];

pub(super) const INIT_STEPS: &[(&str, &str)] = &[
    (
        "CreateDensity",
        r#"        CreateDensity<
            densityProfiles::densityProfile${name}${profile_index},
            startPosition::startPosition${name},
            PIC_${name}
        >"#,
    ),
    (
        "Temperature",
        r#"        Manipulate<
            manipulators::AddTemperature${name},
            PIC_${name}
        >"#,
    ),
    (
        "SetIonCharge",
        r#"        Manipulate<
            manipulators::SetIonCharge${name},
            PIC_${name}
        >"#,
    ),
    (
        "Neutralize",
        r#"        ManipulateDerive<
            manipulators::binary::UnboundElectronsTimesWeighting,
            PIC_${name},
            PIC_${TargetSpeciesName}
        >"#,
    ),
];
