pub mod configuration;

pub mod eddington {
    pub mod densityfrompotential;
    pub mod eddingtoninversion;
    pub mod antiderivdffromenergy;
}

pub mod godicerror;

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod bspline;
            pub mod piecewisepolynomial;
        }
    }
    pub mod grid;
    pub mod quadrature {
        pub mod gaussjacobi;
        pub mod romberg;
    }
    pub mod special;
}

pub mod model {
    pub mod sphericalmodel;
    pub mod plummer;
    pub mod henonisochrone;
    pub mod jaffe;
    pub mod exponential;
    pub mod exponentiallinear;
}

pub mod phasespace {
    pub mod phasespace;
}

pub mod pipeline;
